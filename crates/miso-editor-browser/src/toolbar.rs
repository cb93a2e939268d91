//! Editor toolbar, exposed to the page's buttons.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlDocument, HtmlInputElement};

use miso_editor_core::{EditorCommand, LINK_PROMPT_DEFAULT, PlatformError};

use crate::dom::{first_file, js_error, read_as_data_url};
use crate::editor::with_active;

const LINK_PROMPT: &str = "Entrez l'URL du lien :";

/// Run a command on the current selection, then refresh the status line.
pub fn exec(command: &EditorCommand) -> Result<bool, PlatformError> {
    let document = gloo_utils::document()
        .dyn_into::<HtmlDocument>()
        .map_err(|_| PlatformError::from("not an html document"))?;

    // Commands act on the focused editable region.
    if let Some(region) = with_active(|page| page.region()) {
        region.element().focus().map_err(js_error)?;
    }

    let value = command.value().unwrap_or_default();
    let applied = document
        .exec_command_with_show_ui_and_value(command.command_name(), false, &value)
        .map_err(js_error)?;
    if !applied {
        tracing::debug!(command = command.command_name(), "command not applied");
    }

    with_active(|page| page.update_status());
    Ok(applied)
}

fn unknown(name: &str) -> JsError {
    JsError::new(&format!("unknown or incomplete editor command: {name}"))
}

#[wasm_bindgen(js_name = execCmd)]
pub fn exec_cmd(name: &str) -> Result<bool, JsError> {
    let command = EditorCommand::from_name(name, None).ok_or_else(|| unknown(name))?;
    exec(&command).map_err(|e| JsError::new(&e.to_string()))
}

#[wasm_bindgen(js_name = execCmdWithArg)]
pub fn exec_cmd_with_arg(name: &str, arg: &str) -> Result<bool, JsError> {
    let command = EditorCommand::from_name(name, Some(arg)).ok_or_else(|| unknown(name))?;
    exec(&command).map_err(|e| JsError::new(&e.to_string()))
}

/// Prompt for a URL and link the selection to it.
#[wasm_bindgen(js_name = insertLink)]
pub fn insert_link() -> Result<bool, JsError> {
    let input = gloo_utils::window()
        .prompt_with_message_and_default(LINK_PROMPT, LINK_PROMPT_DEFAULT)
        .map_err(|e| JsError::new(&js_error(e).to_string()))?;
    match input.as_deref().and_then(EditorCommand::link_from_input) {
        Some(command) => exec(&command).map_err(|e| JsError::new(&e.to_string())),
        None => Ok(false),
    }
}

/// Insert the image picked in a file input.
#[wasm_bindgen(js_name = insertImage)]
pub async fn insert_image(input: HtmlInputElement) -> Result<bool, JsValue> {
    let Some(file) = first_file(&input) else {
        return Ok(false);
    };
    let data_url = read_as_data_url(&file)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    match EditorCommand::image_from_input(&data_url) {
        Some(command) => exec(&command).map_err(|e| JsValue::from_str(&e.to_string())),
        None => Ok(false),
    }
}
