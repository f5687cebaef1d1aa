//! Unit tests for code templates

use crate::errors::TemplateError;
use crate::services::verification::{render_template, CodeTemplate};

#[test]
fn test_render_code_field() {
    assert_eq!(render_template("Code: {{.Code}}", "4821").unwrap(), "Code: 4821");
    assert_eq!(render_template("{{ .Code }}/{{.Code}}", "4821").unwrap(), "4821/4821");
}

#[test]
fn test_plain_text_is_unchanged() {
    assert_eq!(render_template("no actions here", "4821").unwrap(), "no actions here");
    assert_eq!(render_template("", "4821").unwrap(), "");
    assert_eq!(render_template("single { brace }", "4821").unwrap(), "single { brace }");
}

#[test]
fn test_trim_markers() {
    assert_eq!(render_template("Code:   {{- .Code -}}  !", "4821").unwrap(), "Code:4821!");
    assert_eq!(render_template("Code: {{.Code -}}\n", "4821").unwrap(), "Code: 4821");
}

#[test]
fn test_comments_render_nothing() {
    assert_eq!(
        render_template("{{/* greeting */}}Hi {{.Code}}", "4821").unwrap(),
        "Hi 4821"
    );
}

#[test]
fn test_unclosed_action() {
    match render_template("Code: {{.Code", "4821") {
        Err(TemplateError::Syntax { position, message }) => {
            assert_eq!(position, 6);
            assert!(message.contains("unclosed"));
        }
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_unsupported_actions_are_syntax_errors() {
    assert!(matches!(render_template("{{}}", "1"), Err(TemplateError::Syntax { .. })));
    assert!(matches!(
        render_template("{{printf \"%s\" .Code}}", "1"),
        Err(TemplateError::Syntax { .. })
    ));
    assert!(matches!(render_template("{{.}}", "1"), Err(TemplateError::Syntax { .. })));
}

#[test]
fn test_unknown_field_is_execution_error() {
    assert!(matches!(
        render_template("Hello {{.Name}}", "4821"),
        Err(TemplateError::Execution { .. })
    ));
    assert!(matches!(
        render_template("{{.Code.Digits}}", "4821"),
        Err(TemplateError::Execution { .. })
    ));
}

#[test]
fn test_syntax_error_reported_before_execution() {
    assert!(matches!(
        render_template("{{.Name}} {{.Code", "4821"),
        Err(TemplateError::Syntax { .. })
    ));
}

#[test]
fn test_parsed_template_is_reusable() {
    let template = CodeTemplate::parse("<b>{{.Code}}</b>").unwrap();
    assert_eq!(template.render("1000").unwrap(), "<b>1000</b>");
    assert_eq!(template.render("9999").unwrap(), "<b>9999</b>");
}
