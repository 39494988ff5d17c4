// src/extraction/lopdf_source.rs
use super::PdfSource;
use crate::error::ExtractionError;
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;

/// A `TJ` kerning offset below this (thousandths of an em) reads as a word gap.
const TJ_WORD_GAP: f32 = -100.0;

pub struct LopdfSource {
    document: Document,
    pages: BTreeMap<u32, ObjectId>,
}

impl LopdfSource {
    pub fn load(bytes: &[u8]) -> Result<Self, ExtractionError> {
        let document =
            Document::load_mem(bytes).map_err(|e| ExtractionError::Load(e.to_string()))?;

        let pages = document.get_pages();
        Ok(Self { document, pages })
    }

    fn page_error(page: u32, reason: impl ToString) -> ExtractionError {
        ExtractionError::Page {
            page,
            reason: reason.to_string(),
        }
    }
}

/// Decoded text of one show-text operation's operands.
fn shown_text(encoding: Option<&str>, operands: &[Object], out: &mut String) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => out.push_str(&Document::decode_text(encoding, bytes)),
            Object::Array(items) => shown_text(encoding, items, out),
            Object::Integer(offset) if (*offset as f32) < TJ_WORD_GAP => out.push(' '),
            Object::Real(offset) if *offset < TJ_WORD_GAP => out.push(' '),
            _ => {}
        }
    }
}

impl PdfSource for LopdfSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// One fragment per show-text operation (`Tj`, `TJ`, `'`, `"`), decoded
    /// with the encoding of the font selected by the last `Tf`.
    fn page_fragments(&self, page_number: u32) -> Result<Vec<String>, ExtractionError> {
        let page_id = *self
            .pages
            .get(&page_number)
            .ok_or_else(|| Self::page_error(page_number, "page not found"))?;

        let encodings: BTreeMap<Vec<u8>, &str> = self
            .document
            .get_page_fonts(page_id)
            .into_iter()
            .map(|(name, font)| (name, font.get_font_encoding()))
            .collect();

        let data = self
            .document
            .get_page_content(page_id)
            .map_err(|e| Self::page_error(page_number, e))?;
        let content = Content::decode(&data).map_err(|e| Self::page_error(page_number, e))?;

        let mut fragments = Vec::new();
        let mut encoding = None;
        for operation in &content.operations {
            match operation.operator.as_str() {
                "Tf" => {
                    encoding = operation
                        .operands
                        .first()
                        .and_then(|font| font.as_name().ok())
                        .and_then(|name| encodings.get(name).copied());
                }
                "Tj" | "TJ" | "'" | "\"" => {
                    let mut text = String::new();
                    shown_text(encoding, &operation.operands, &mut text);
                    let text = text.trim();
                    if !text.is_empty() {
                        fragments.push(text.to_string());
                    }
                }
                _ => {}
            }
        }

        Ok(fragments)
    }
}
