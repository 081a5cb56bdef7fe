//! XML rendering of wire documents.
//!
//! Objects become elements with one child per field, in field-table order.
//! Arrays become a container element holding one child element per item:
//! `<errors><error>…</error></errors>`. `null` renders as an empty element.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;

use super::fields;
use super::WireDocument;
use crate::errors::ModelError;

/// Fallback child name for arrays that have no registered singular form.
const ITEM: &str = "item";

pub fn to_xml_string<T: WireDocument>(doc: &T) -> Result<String, ModelError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    write_value(&mut writer, T::ELEMENT, T::ITEM, &doc.encode())?;
    String::from_utf8(writer.into_inner()).map_err(|e| ModelError::Xml(e.to_string()))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), ModelError> {
    writer.write_event(event).map_err(|e| ModelError::Xml(e.to_string()))
}

fn write_value(writer: &mut Writer<Vec<u8>>, name: &str, item: Option<&str>, value: &Value) -> Result<(), ModelError> {
    match value {
        Value::Null => emit(writer, Event::Empty(BytesStart::new(name))),
        Value::Bool(b) => write_text(writer, name, if *b { "true" } else { "false" }),
        Value::Number(n) => write_text(writer, name, &n.to_string()),
        Value::String(s) => write_text(writer, name, s),
        Value::Array(items) => {
            let child = item.or_else(|| fields::singular(name)).unwrap_or(ITEM);
            emit(writer, Event::Start(BytesStart::new(name)))?;
            for entry in items {
                write_value(writer, child, None, entry)?;
            }
            emit(writer, Event::End(BytesEnd::new(name)))
        }
        Value::Object(map) => {
            emit(writer, Event::Start(BytesStart::new(name)))?;
            for (field, entry) in map {
                write_value(writer, field, None, entry)?;
            }
            emit(writer, Event::End(BytesEnd::new(name)))
        }
    }
}

fn write_text(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), ModelError> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}
