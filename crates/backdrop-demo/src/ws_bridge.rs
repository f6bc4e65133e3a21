//! WebSocket IPC bridge between the controller and the form page.
//!
//! One page connection at a time. Each connection gets a fresh
//! [`RemoteSurface`] and [`FormController`]; inbound messages are handled in
//! order, outbound patches are streamed as they are produced (including the
//! ones written later by a background image read).

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;

use backdrop_controller::{FormController, FormEvent};
use backdrop_core::SelectedFile;
use backdrop_frontend_core::ElementId;

use crate::file_dialog;
use crate::ipc::{ControllerToUi, UiToController};
use crate::remote_surface::RemoteSurface;

/// Errors that stop the bridge.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Listen on `ws://127.0.0.1:{port}` and serve page connections forever.
pub async fn serve(port: u16) -> Result<(), BridgeError> {
    let addr = format!("127.0.0.1:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| BridgeError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!("WebSocket IPC server listening on ws://{addr}");

    // Accept connections in a loop, but only one page at a time.
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!("TCP accept error: {e}");
                continue;
            }
        };
        tracing::info!("WebSocket client connected: {peer}");

        let ws_stream = match tokio_tungstenite::accept_async(stream).await {
            Ok(ws) => ws,
            Err(e) => {
                tracing::error!("WebSocket handshake failed: {e}");
                continue;
            }
        };

        run_session(ws_stream).await;
        tracing::info!("WebSocket client disconnected");
    }
}

/// Drive one page connection until it closes.
async fn run_session<T>(ws_stream: WebSocketStream<T>)
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let (mut ws_sink, mut ws_source) = ws_stream.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<ControllerToUi>();
    let surface = Arc::new(Mutex::new(RemoteSurface::new(outbound_tx)));
    let mut controller = FormController::with_shared(surface);

    loop {
        tokio::select! {
            incoming = ws_source.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<UiToController>(text.as_str()) {
                        Ok(msg) => handle_ui_message(&mut controller, msg).await,
                        Err(e) => tracing::warn!("Failed to parse UI message: {e}"),
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket receive failed: {e}");
                    break;
                }
            },
            Some(msg) = outbound_rx.recv() => match serde_json::to_string(&msg) {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::error!("Failed to serialize ControllerToUi: {e}"),
            },
        }
    }
}

/// Mirror any control value the message carries, then run the matching
/// controller entry point. Failures are logged and reported to the page.
pub async fn handle_ui_message(
    controller: &mut FormController<RemoteSurface>,
    msg: UiToController,
) {
    let event = match msg {
        UiToController::Ready { values } => {
            let mut surface = controller.surface().lock();
            for control in values {
                surface.sync_value(control.id, control.value);
            }
            FormEvent::Ready
        }
        UiToController::InputChanged { id, value } => {
            sync(controller, id, value);
            return;
        }
        UiToController::BackgroundTypeChanged { value } => {
            sync(controller, ElementId::BackgroundType, value);
            FormEvent::BackgroundTypeChanged
        }
        UiToController::ColorChanged { value } => {
            sync(controller, ElementId::ColorPicker, value);
            FormEvent::ColorChanged
        }
        UiToController::AlphaChanged { value } => {
            sync(controller, ElementId::AlphaSlider, value);
            FormEvent::AlphaChanged
        }
        UiToController::PresetSelected { color } => FormEvent::PresetSelected(color),
        UiToController::FileSelected { path, content_type } => {
            let file = match content_type {
                Some(content_type) => SelectedFile::new(path, content_type),
                None => SelectedFile::from_path(path),
            };
            FormEvent::FileChanged(Some(file))
        }
        UiToController::FileCleared => FormEvent::FileChanged(None),
        UiToController::BrowseFile => match file_dialog::pick_image().await {
            Some(path) => FormEvent::FileChanged(Some(SelectedFile::from_path(path))),
            None => {
                tracing::debug!("file dialog dismissed");
                return;
            }
        },
    };

    tracing::debug!(?event, "dispatching form event");
    if let Err(e) = controller.dispatch(event) {
        tracing::warn!("Form update failed: {e}");
        let report = controller.surface().lock().send(ControllerToUi::Error {
            message: e.to_string(),
        });
        if let Err(e) = report {
            tracing::warn!("Failed to report error to UI: {e}");
        }
    }
}

fn sync(controller: &FormController<RemoteSurface>, id: ElementId, value: String) {
    controller.surface().lock().sync_value(id, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::preview::REJECTION_MESSAGE;
    use backdrop_frontend_core::DomPatch;

    use crate::ipc::ControlValue;

    fn session() -> (
        FormController<RemoteSurface>,
        mpsc::UnboundedReceiver<ControllerToUi>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = FormController::new(RemoteSurface::new(tx));
        (controller, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ControllerToUi>) -> Vec<ControllerToUi> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push(msg);
        }
        out
    }

    fn patch(msg: &ControllerToUi) -> &DomPatch {
        match msg {
            ControllerToUi::Patch { patch } => patch,
            other => panic!("expected patch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ready_syncs_values_then_initializes() {
        let (mut controller, mut rx) = session();
        let values = vec![
            ControlValue {
                id: ElementId::BackgroundType,
                value: "color".into(),
            },
            ControlValue {
                id: ElementId::ComposedColor,
                value: "#00000000".into(),
            },
        ];
        handle_ui_message(&mut controller, UiToController::Ready { values }).await;

        let sent = drain(&mut rx);
        assert_eq!(
            sent.iter().map(patch).cloned().collect::<Vec<_>>(),
            vec![
                DomPatch::SetDisplay {
                    id: ElementId::ColorOptions,
                    visible: true
                },
                DomPatch::SetClass {
                    id: ElementId::ColorPreview,
                    class: "color-preview transparent-preview".into()
                },
                DomPatch::SetBackgroundColor {
                    id: ElementId::ColorPreview,
                    color: None
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_alpha_change_streams_label_and_color() {
        let (mut controller, mut rx) = session();
        handle_ui_message(
            &mut controller,
            UiToController::AlphaChanged {
                value: "0".into(),
            },
        )
        .await;

        let sent = drain(&mut rx);
        assert_eq!(
            patch(&sent[0]),
            &DomPatch::SetText {
                id: ElementId::AlphaLabel,
                text: "0%".into()
            }
        );
        assert_eq!(
            patch(&sent[1]),
            &DomPatch::SetValue {
                id: ElementId::ComposedColor,
                value: "#ffffff00".into()
            }
        );
    }

    #[tokio::test]
    async fn test_input_changed_only_mirrors() {
        let (mut controller, mut rx) = session();
        handle_ui_message(
            &mut controller,
            UiToController::InputChanged {
                id: ElementId::ColorPicker,
                value: "#123456".into(),
            },
        )
        .await;
        assert!(drain(&mut rx).is_empty());

        handle_ui_message(
            &mut controller,
            UiToController::ColorChanged {
                value: "#123456".into(),
            },
        )
        .await;
        let sent = drain(&mut rx);
        assert_eq!(
            patch(&sent[0]),
            &DomPatch::SetValue {
                id: ElementId::ComposedColor,
                value: "#123456ff".into()
            }
        );
    }

    #[tokio::test]
    async fn test_bad_alpha_is_reported_to_ui() {
        let (mut controller, mut rx) = session();
        handle_ui_message(
            &mut controller,
            UiToController::AlphaChanged {
                value: "999".into(),
            },
        )
        .await;
        let sent = drain(&mut rx);
        assert!(matches!(sent.as_slice(), [ControllerToUi::Error { .. }]));
    }

    #[tokio::test]
    async fn test_non_image_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let (mut controller, mut rx) = session();
        handle_ui_message(
            &mut controller,
            UiToController::FileSelected {
                path: path.to_string_lossy().into_owned(),
                content_type: None,
            },
        )
        .await;

        let sent = drain(&mut rx);
        assert_eq!(
            sent.iter().map(patch).cloned().collect::<Vec<_>>(),
            vec![
                DomPatch::ClearChildren {
                    id: ElementId::ImagePreview
                },
                DomPatch::AppendError {
                    id: ElementId::ImagePreview,
                    message: REJECTION_MESSAGE.into()
                },
            ]
        );
    }
}
