use anyhow::{anyhow, Result};
use serde_json::Value;
use shared::ReportRow;
use wasm_bindgen::{JsCast, JsValue};

/// Quote a CSV field when it contains a delimiter, quote, or newline.
pub fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render a report cell as text. Strings drop their JSON quotes, null is
/// empty, everything else keeps its JSON rendering.
pub fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Assemble a CSV document from the visible columns of a report.
pub fn build_csv(columns: &[String], rows: &[ReportRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        columns
            .iter()
            .map(|c| escape_field(c))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        let line = columns
            .iter()
            .map(|column| {
                let cell = row.get(column).map(value_to_cell).unwrap_or_default();
                escape_field(&cell)
            })
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    lines.join("\n")
}

fn js_err(err: JsValue) -> anyhow::Error {
    anyhow!("{:?}", err)
}

/// Trigger a browser download of `contents` under `filename`.
pub fn download(filename: &str, contents: &str) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window.document().ok_or_else(|| anyhow!("no document"))?;

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(contents));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| anyhow!("anchor element has unexpected type"))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(js_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, Value)]) -> ReportRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn plain_fields_pass_through() {
        assert_eq!(escape_field("Ann Lee"), "Ann Lee");
    }

    #[test]
    fn delimiters_quotes_and_newlines_are_escaped() {
        assert_eq!(escape_field("Lee, Ann"), "\"Lee, Ann\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn build_csv_emits_header_and_rows_in_column_order() {
        let columns = vec!["name".to_string(), "ministry".to_string()];
        let rows = vec![
            row(&[
                ("name", Value::String("Ann Lee".into())),
                ("ministry", Value::String("Choir, Youth".into())),
            ]),
            row(&[("name", Value::String("Bo Lee".into())), ("ministry", Value::Null)]),
        ];
        let csv = build_csv(&columns, &rows);
        assert_eq!(csv, "name,ministry\nAnn Lee,\"Choir, Youth\"\nBo Lee,");
    }

    #[test]
    fn cells_render_without_json_quoting() {
        assert_eq!(value_to_cell(&Value::String("x".into())), "x");
        assert_eq!(value_to_cell(&Value::Null), "");
        assert_eq!(value_to_cell(&serde_json::json!(42)), "42");
        assert_eq!(value_to_cell(&serde_json::json!(true)), "true");
    }
}
