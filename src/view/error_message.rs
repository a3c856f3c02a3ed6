use askama::Template;

/// How a validation message is presented next to a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorStyle {
    #[default]
    Inline,
    Boxed,
}

#[derive(Template)]
#[template(source = r#"<span class="error-message">{{ message }}</span>"#, ext = "html")]
struct InlineError<'a> {
    message: &'a str,
}

#[derive(Template)]
#[template(
    source = r#"<div class="error-box" role="alert"><p>{{ message }}</p></div>"#,
    ext = "html"
)]
struct BoxedError<'a> {
    message: &'a str,
}

/// Renders an HTML fragment for `message`, or `None` when there is nothing
/// to show (absent, empty or whitespace-only). The message is HTML-escaped.
pub fn render_error_message(
    message: Option<&str>,
    style: ErrorStyle,
) -> Result<Option<String>, askama::Error> {
    let message = match message {
        Some(m) if !m.trim().is_empty() => m,
        _ => return Ok(None),
    };

    let html = match style {
        ErrorStyle::Inline => InlineError { message }.render()?,
        ErrorStyle::Boxed => BoxedError { message }.render()?,
    };
    Ok(Some(html))
}
