//! Form filling and serialization
//!
//! Loads a template read-only into memory, writes mapping values into the
//! AcroForm text fields page by page, and serializes the result to an
//! in-memory buffer. The template file on disk is never touched.
//!
//! Every mapping entry is attempted against every page: the forms scope
//! distinct field names to distinct pages, so a name that does not occur
//! on a given page is a silent per-page no-op. A name that occurs on no
//! page at all is a genuine template/mapping mismatch and is surfaced in
//! the [`FillReport`] and logged.

use std::collections::BTreeSet;
use std::path::Path;

use lopdf::{Document, Object, ObjectId};

use crate::error::EngineError;
use crate::mapping::FieldMapping;

/// Outcome of one fill: which mapping entries landed and which matched
/// nothing.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FillReport {
    /// Page count of the (cloned) document
    pub pages: usize,
    /// Field names written on at least one page
    pub written: Vec<String>,
    /// Field names present in the mapping but found on no page
    pub unmatched: Vec<String>,
}

/// A filled contract ready to persist
#[derive(Debug, Clone)]
pub struct FilledLetter {
    pub bytes: Vec<u8>,
    pub report: FillReport,
}

/// Fill a template's form fields from a mapping and serialize the result.
///
/// Fails only for a missing or unparseable template; every data-level
/// shortfall was already absorbed while building the mapping.
pub fn fill_template(
    template_path: &Path,
    mapping: &FieldMapping,
) -> Result<FilledLetter, EngineError> {
    let mut doc = load_template(template_path)?;

    let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    let mut written: BTreeSet<String> = BTreeSet::new();

    for page_id in &page_ids {
        for widget_id in page_annotations(&doc, *page_id) {
            let (owner_id, name) = match field_owner(&doc, widget_id) {
                Some(owner) => owner,
                None => continue,
            };
            if let Some(value) = mapping.get(&name) {
                if write_field_value(&mut doc, owner_id, value) {
                    written.insert(name);
                }
            }
        }
    }

    if !written.is_empty() {
        set_need_appearances(&mut doc);
    }

    let unmatched: Vec<String> = mapping
        .keys()
        .filter(|name| !written.contains(*name))
        .cloned()
        .collect();
    for field in &unmatched {
        tracing::warn!(
            field = %field,
            template = %template_path.display(),
            "mapped field not present on any page of template"
        );
    }

    let report = FillReport {
        pages: page_ids.len(),
        written: written.into_iter().collect(),
        unmatched,
    };

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| EngineError::Serialize(e.into()))?;

    Ok(FilledLetter { bytes, report })
}

/// Collect the field names defined across all pages of a template.
///
/// Used by the registry's startup consistency check.
pub fn template_field_names(template_path: &Path) -> Result<BTreeSet<String>, EngineError> {
    let doc = load_template(template_path)?;

    let mut names = BTreeSet::new();
    for page_id in doc.get_pages().values() {
        for widget_id in page_annotations(&doc, *page_id) {
            if let Some((_, name)) = field_owner(&doc, widget_id) {
                names.insert(name);
            }
        }
    }
    Ok(names)
}

/// Load a template into memory; the file itself is never written back
fn load_template(template_path: &Path) -> Result<Document, EngineError> {
    if !template_path.exists() {
        return Err(EngineError::TemplateMissing(template_path.to_path_buf()));
    }
    let bytes = std::fs::read(template_path).map_err(|source| EngineError::TemplateRead {
        path: template_path.to_path_buf(),
        source,
    })?;
    Document::load_mem(&bytes).map_err(|source| EngineError::TemplateParse {
        path: template_path.to_path_buf(),
        source,
    })
}

/// Widget annotation ids on a page; `/Annots` may be inline or indirect
fn page_annotations(doc: &Document, page_id: ObjectId) -> Vec<ObjectId> {
    let page_dict = match doc.get_object(page_id).and_then(|obj| obj.as_dict()) {
        Ok(dict) => dict,
        Err(_) => return Vec::new(),
    };

    let annots = match page_dict.get(b"Annots") {
        Ok(Object::Array(array)) => array.clone(),
        Ok(Object::Reference(id)) => {
            match doc.get_object(*id).and_then(|obj| obj.as_array()) {
                Ok(array) => array.clone(),
                Err(_) => return Vec::new(),
            }
        }
        _ => return Vec::new(),
    };

    annots
        .iter()
        .filter_map(|obj| obj.as_reference().ok())
        .collect()
}

/// The dictionary owning a widget's field name: the widget itself, or its
/// `/Parent` when the name lives on a shared parent field.
fn field_owner(doc: &Document, widget_id: ObjectId) -> Option<(ObjectId, String)> {
    let dict = doc.get_object(widget_id).ok()?.as_dict().ok()?;
    if let Ok(Object::String(bytes, _)) = dict.get(b"T") {
        return Some((widget_id, String::from_utf8_lossy(bytes).into_owned()));
    }
    if let Ok(parent_id) = dict.get(b"Parent").and_then(|obj| obj.as_reference()) {
        let parent = doc.get_object(parent_id).ok()?.as_dict().ok()?;
        if let Ok(Object::String(bytes, _)) = parent.get(b"T") {
            return Some((parent_id, String::from_utf8_lossy(bytes).into_owned()));
        }
    }
    None
}

/// Set `/V` on a field dictionary, dropping any stale appearance stream
fn write_field_value(doc: &mut Document, owner_id: ObjectId, value: &str) -> bool {
    match doc.get_object_mut(owner_id).and_then(|obj| obj.as_dict_mut()) {
        Ok(dict) => {
            dict.set("V", Object::string_literal(value));
            dict.remove(b"AP");
            true
        }
        Err(_) => false,
    }
}

/// Ask viewers to regenerate field appearances for the values we wrote
fn set_need_appearances(doc: &mut Document) {
    let catalog_id = match doc.trailer.get(b"Root").and_then(|obj| obj.as_reference()) {
        Ok(id) => id,
        Err(_) => return,
    };

    enum AcroForm {
        Indirect(ObjectId),
        Inline(lopdf::Dictionary),
    }

    let acroform = {
        let catalog = match doc.get_object(catalog_id).and_then(|obj| obj.as_dict()) {
            Ok(dict) => dict,
            Err(_) => return,
        };
        match catalog.get(b"AcroForm") {
            Ok(Object::Reference(id)) => AcroForm::Indirect(*id),
            Ok(Object::Dictionary(dict)) => AcroForm::Inline(dict.clone()),
            _ => return,
        }
    };

    match acroform {
        AcroForm::Indirect(id) => {
            if let Ok(dict) = doc.get_object_mut(id).and_then(|obj| obj.as_dict_mut()) {
                dict.set("NeedAppearances", Object::Boolean(true));
            }
        }
        AcroForm::Inline(mut dict) => {
            dict.set("NeedAppearances", Object::Boolean(true));
            if let Ok(catalog) = doc
                .get_object_mut(catalog_id)
                .and_then(|obj| obj.as_dict_mut())
            {
                catalog.set("AcroForm", Object::Dictionary(dict));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Dictionary, Stream};
    use std::io::Write as _;

    /// Build a template PDF with AcroForm text fields, one field list per
    /// page.
    fn build_template(fields_by_page: &[&[&str]]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut page_ids = Vec::new();
        let mut field_ids = Vec::new();

        for page_fields in fields_by_page {
            let page_id = doc.new_object_id();
            let content_id = doc.add_object(Object::Stream(Stream::new(
                Dictionary::new(),
                b"BT /F1 10 Tf 50 760 Td (Contract) Tj ET".to_vec(),
            )));

            let mut annot_ids = Vec::new();
            for (i, name) in page_fields.iter().enumerate() {
                let top = 700 - 40 * i as i64;
                let field_id = doc.add_object(dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Widget",
                    "FT" => "Tx",
                    "T" => Object::string_literal(*name),
                    "Rect" => vec![
                        50.into(),
                        top.into(),
                        400.into(),
                        (top + 20).into(),
                    ],
                    "P" => Object::Reference(page_id),
                });
                annot_ids.push(Object::Reference(field_id));
                field_ids.push(Object::Reference(field_id));
            }

            let page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "Contents" => Object::Reference(content_id),
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Annots" => Object::Array(annot_ids),
            };
            doc.objects.insert(page_id, Object::Dictionary(page_dict));
            page_ids.push(Object::Reference(page_id));
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Count" => fields_by_page.len() as i64,
            "Kids" => Object::Array(page_ids),
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let acroform_id = doc.add_object(dictionary! {
            "Fields" => Object::Array(field_ids),
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
            "AcroForm" => Object::Reference(acroform_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    fn write_template(dir: &std::path::Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    /// Read back every `/V` in the document, keyed by `/T`
    fn field_values(bytes: &[u8]) -> std::collections::BTreeMap<String, String> {
        let doc = Document::load_mem(bytes).unwrap();
        let mut values = std::collections::BTreeMap::new();
        for (_, object) in doc.objects.iter() {
            if let Ok(dict) = object.as_dict() {
                if let (Ok(Object::String(name, _)), Ok(Object::String(value, _))) =
                    (dict.get(b"T"), dict.get(b"V"))
                {
                    values.insert(
                        String::from_utf8_lossy(name).into_owned(),
                        String::from_utf8_lossy(value).into_owned(),
                    );
                }
            }
        }
        values
    }

    fn mapping(entries: &[(&str, &str)]) -> FieldMapping {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_fill_writes_values_into_fields() {
        let dir = tempfile::tempdir().unwrap();
        let template = build_template(&[&["Buyer Name", "Email"], &["Address of Property"]]);
        let path = write_template(dir.path(), "contract.pdf", &template);

        let filled = fill_template(
            &path,
            &mapping(&[
                ("Buyer Name", "Jordan Avery"),
                ("Email", "jordan@example.com"),
                ("Address of Property", "1205 Elmwood Dr, Austin, TX 78704"),
            ]),
        )
        .unwrap();

        assert_eq!(filled.report.pages, 2);
        assert!(filled.report.unmatched.is_empty());
        let values = field_values(&filled.bytes);
        assert_eq!(values["Buyer Name"], "Jordan Avery");
        assert_eq!(
            values["Address of Property"],
            "1205 Elmwood Dr, Austin, TX 78704"
        );
    }

    #[test]
    fn test_fill_sets_field_on_every_page_it_occurs() {
        let dir = tempfile::tempdir().unwrap();
        // Same field name as a separate widget on each page
        let template = build_template(&[&["Contract Concerning"], &["Contract Concerning"]]);
        let path = write_template(dir.path(), "contract.pdf", &template);

        let filled =
            fill_template(&path, &mapping(&[("Contract Concerning", "repeated")])).unwrap();

        let doc = Document::load_mem(&filled.bytes).unwrap();
        let mut widgets_with_value = 0;
        for (_, object) in doc.objects.iter() {
            if let Ok(dict) = object.as_dict() {
                if dict.has(b"T") && dict.has(b"V") {
                    widgets_with_value += 1;
                }
            }
        }
        assert_eq!(widgets_with_value, 2);
    }

    #[test]
    fn test_fill_reports_fields_matching_no_page() {
        let dir = tempfile::tempdir().unwrap();
        let template = build_template(&[&["Email"]]);
        let path = write_template(dir.path(), "contract.pdf", &template);

        let filled = fill_template(
            &path,
            &mapping(&[("Email", "a@b.c"), ("No Such Field", "value")]),
        )
        .unwrap();

        assert_eq!(filled.report.written, vec!["Email".to_string()]);
        assert_eq!(filled.report.unmatched, vec!["No Such Field".to_string()]);
    }

    #[test]
    fn test_fill_missing_template_is_fatal() {
        let err = fill_template(
            std::path::Path::new("/nope/contract.pdf"),
            &FieldMapping::new(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::TemplateMissing(_)));
    }

    #[test]
    fn test_fill_does_not_touch_source_template() {
        let dir = tempfile::tempdir().unwrap();
        let template = build_template(&[&["Email"]]);
        let path = write_template(dir.path(), "contract.pdf", &template);

        fill_template(&path, &mapping(&[("Email", "a@b.c")])).unwrap();

        let after = std::fs::read(&path).unwrap();
        assert_eq!(after, template);
    }

    #[test]
    fn test_fill_sets_need_appearances() {
        let dir = tempfile::tempdir().unwrap();
        let template = build_template(&[&["Email"]]);
        let path = write_template(dir.path(), "contract.pdf", &template);

        let filled = fill_template(&path, &mapping(&[("Email", "a@b.c")])).unwrap();

        let doc = Document::load_mem(&filled.bytes).unwrap();
        let catalog_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
        let catalog = doc.get_object(catalog_id).unwrap().as_dict().unwrap();
        let acroform_id = catalog.get(b"AcroForm").unwrap().as_reference().unwrap();
        let acroform = doc.get_object(acroform_id).unwrap().as_dict().unwrap();
        assert_eq!(
            acroform.get(b"NeedAppearances").unwrap().as_bool().unwrap(),
            true
        );
    }

    #[test]
    fn test_template_field_names_collects_all_pages() {
        let dir = tempfile::tempdir().unwrap();
        let template = build_template(&[&["Email", "Buyer Name"], &["Address of Property"]]);
        let path = write_template(dir.path(), "contract.pdf", &template);

        let names = template_field_names(&path).unwrap();
        assert_eq!(
            names.into_iter().collect::<Vec<_>>(),
            vec![
                "Address of Property".to_string(),
                "Buyer Name".to_string(),
                "Email".to_string()
            ]
        );
    }
}
