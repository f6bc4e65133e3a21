//! Embedded form page.
//!
//! The page carries the markup defaults and a small script that reports
//! control events over the WebSocket bridge and applies the patches it gets
//! back. All derived values are computed by the controller.

use std::path::Path;

use backdrop_core::PresetColor;

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Backdrop</title>
    <style>
        body { font-family: system-ui, -apple-system, sans-serif; margin: 24px; }
        #color-options { margin: 12px 0; }
        .color-preview { width: 64px; height: 64px; border: 1px solid #ccc; }
        .transparent-preview {
            background-image:
                linear-gradient(45deg, #ccc 25%, transparent 25%),
                linear-gradient(-45deg, #ccc 25%, transparent 25%),
                linear-gradient(45deg, transparent 75%, #ccc 75%),
                linear-gradient(-45deg, transparent 75%, #ccc 75%);
            background-size: 16px 16px;
            background-position: 0 0, 0 8px, 8px -8px, -8px 0;
        }
        .preset { width: 24px; height: 24px; border: 1px solid #999; }
        #image-preview img { max-width: 320px; max-height: 240px; }
        .error { color: #c00; }
    </style>
</head>
<body>
<form method="post" enctype="multipart/form-data">
    <button type="button" id="file">Choose image…</button>
    <div id="image-preview"></div>

    <label>Background
        <select id="bg_type" name="bg_type">
            <option value="transparent" selected>Transparent</option>
            <option value="color">Solid color</option>
        </select>
    </label>

    <div id="color-options">
        <input type="color" id="color_picker" value="#ffffff">
        <input type="range" id="alpha_slider" min="0" max="255" value="255">
        <span id="alpha_value">100%</span>
        <input type="hidden" id="bg_color" name="bg_color" value="#ffffffff">
        <div id="color_preview" class="color-preview"></div>
        <div class="presets">
__PRESETS__
        </div>
    </div>
</form>
<script>
    const ws = new WebSocket("ws://127.0.0.1:__WS_PORT__");
    const $ = (id) => document.getElementById(id);
    const send = (type, data) =>
        ws.send(JSON.stringify(data === undefined ? { type } : { type, data }));
    const images = new Map();

    function applyPatch(p) {
        switch (p.op) {
            case "set_value": $(p.id).value = p.value; break;
            case "set_text": $(p.id).textContent = p.text; break;
            case "set_display": $(p.id).style.display = p.visible ? "block" : "none"; break;
            case "set_class": $(p.id).className = p.class; break;
            case "set_background_color": $(p.id).style.backgroundColor = p.color ?? ""; break;
            case "clear_children": $(p.id).innerHTML = ""; images.clear(); break;
            case "append_error": {
                const el = document.createElement("p");
                el.className = "error";
                el.textContent = p.message;
                $(p.id).appendChild(el);
                break;
            }
            case "append_image": {
                const img = document.createElement("img");
                images.set(p.slot, img);
                $(p.id).appendChild(img);
                break;
            }
            case "set_image_source": {
                const img = images.get(p.slot);
                if (img) img.src = p.src;
                break;
            }
        }
    }

    ws.onmessage = (e) => {
        const msg = JSON.parse(e.data);
        if (msg.type === "Patch") applyPatch(msg.data.patch);
        else if (msg.type === "Error") console.error(msg.data.message);
    };
    ws.onopen = () => send("Ready", {
        values: __INPUT_IDS__.map((id) => ({ id, value: $(id).value })),
    });

    const report = (id, event, type) =>
        $(id).addEventListener(event, (e) => send(type, { value: e.target.value }));
    report("bg_type", "change", "BackgroundTypeChanged");
    report("color_picker", "input", "ColorChanged");
    report("alpha_slider", "input", "AlphaChanged");
    $("file").addEventListener("click", () => send("BrowseFile"));
    document.querySelectorAll("[data-preset]").forEach((b) =>
        b.addEventListener("click", () => send("PresetSelected", { color: b.dataset.preset })));
</script>
</body>
</html>
"##;

/// Input controls whose values are reported on `Ready`.
const INPUT_IDS: [&str; 4] = ["bg_type", "color_picker", "alpha_slider", "bg_color"];

/// Render the form page for the given bridge port.
pub fn get_html(ws_port: u16) -> String {
    let input_ids = format!(
        "[{}]",
        INPUT_IDS
            .iter()
            .map(|id| format!("\"{id}\""))
            .collect::<Vec<_>>()
            .join(", ")
    );
    PAGE_TEMPLATE
        .replace("__WS_PORT__", &ws_port.to_string())
        .replace("__PRESETS__", &preset_buttons())
        .replace("__INPUT_IDS__", &input_ids)
}

fn preset_buttons() -> String {
    PresetColor::ALL
        .iter()
        .map(|token| {
            let style = match PresetColor::from_token(token) {
                PresetColor::Transparent => "class=\"preset transparent-preview\"".to_string(),
                PresetColor::Opaque(rgb) => format!("class=\"preset\" style=\"background: {rgb}\""),
            };
            format!(
                "            <button type=\"button\" {style} \
                 data-preset=\"{token}\" title=\"{token}\"></button>"
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the page to disk so a browser can open it.
pub fn write_page(path: &Path, ws_port: u16) -> std::io::Result<()> {
    std::fs::write(path, get_html(ws_port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_frontend_core::ElementId;

    #[test]
    fn test_page_carries_every_element() {
        let html = get_html(9999);
        for id in ElementId::ALL {
            assert!(
                html.contains(&format!("id=\"{}\"", id.dom_id())),
                "missing #{id}"
            );
        }
        assert!(html.contains("ws://127.0.0.1:9999"));
        assert!(!html.contains("__"));
    }

    #[test]
    fn test_page_lists_presets() {
        let html = get_html(1);
        for token in PresetColor::ALL {
            assert!(html.contains(&format!("data-preset=\"{token}\"")));
        }
    }

    #[test]
    fn test_reported_inputs_are_known_elements() {
        for id in INPUT_IDS {
            assert!(ElementId::from_dom_id(id).is_some(), "{id}");
        }
    }

    #[test]
    fn test_write_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        write_page(&path, 1234).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("127.0.0.1:1234"));
    }
}
