//! Custom field types through the facade

use formdown_core::{
    Field, FieldTypeRenderer, Formdown, FormdownError, RenderMetadata,
};

struct Stars;

impl FieldTypeRenderer for Stars {
    fn name(&self) -> &str {
        "stars"
    }

    fn description(&self) -> &str {
        "Star rating"
    }

    fn render(&self, field: &Field, metadata: &RenderMetadata<'_>) -> Option<String> {
        let max = field.attributes.get("max")?;
        Some(format!(
            "<x-stars id=\"{}\" form=\"{}\" max=\"{max}\"></x-stars>",
            metadata.id,
            metadata.form_id.unwrap_or_default()
        ))
    }

    fn validate(&self, field: &Field) -> Result<(), String> {
        if field.attributes.contains_key("max") {
            Ok(())
        } else {
            Err("max is required".to_string())
        }
    }
}

fn formdown() -> Formdown {
    let mut formdown = Formdown::new();
    formdown.register(Stars);
    formdown
}

#[test]
fn test_registered_renderer_output_is_verbatim() {
    let html = formdown().render("@rating: [stars max=5]");
    assert!(html.contains(
        "<x-stars id=\"rating\" form=\"formdown-form-default\" max=\"5\"></x-stars>"
    ));
    assert!(!html.contains("formdown-field-container"));
}

#[test]
fn test_declined_render_falls_back() {
    let html = formdown().render("@rating: [stars]");
    assert!(html.contains("data-field-type=\"stars\""));
}

#[test]
fn test_validation_failures_are_reported() {
    let formdown = formdown();
    let report = formdown.parse("@rating: [stars]\n@ok: [stars max=3]");
    assert_eq!(report.document.forms.len(), 2);
    assert_eq!(report.errors, vec!["Field 'rating': max is required".to_string()]);

    let errors = formdown.validate(&report.document);
    assert_eq!(
        errors,
        vec![FormdownError::Validation {
            field: "rating".into(),
            message: "max is required".into(),
        }]
    );
}

#[test]
fn test_registry_lookup() {
    let formdown = formdown();
    assert!(formdown.registry().has("stars"));
    assert_eq!(formdown.registry().list_types(), vec!["stars".to_string()]);
    assert_eq!(formdown.registry().get("stars").map(|r| r.description()), Ok("Star rating"));
    assert!(matches!(
        formdown.registry().get("nope"),
        Err(FormdownError::UnknownFieldType(name)) if name == "nope"
    ));
}
