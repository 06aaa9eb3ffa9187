use super::theme::Stylesheet;

/// Wraps rendered fragments in the HTML shell shown by the preview surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentWrapper {
    stylesheet: Stylesheet,
}

impl DocumentWrapper {
    pub fn new(stylesheet: Stylesheet) -> Self {
        Self { stylesheet }
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    pub fn wrap(&self, fragment: &str) -> String {
        format!(
            "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<meta http-equiv=\"Content-Security-Policy\" content=\"default-src 'none'; img-src * data:; style-src 'unsafe-inline'\">
<style>
{css}
</style>
</head>
<body>
{fragment}
</body>
</html>
",
            css = self.stylesheet.css(),
            fragment = fragment,
        )
    }
}

/// Wrap with the default style sheet.
pub fn wrap(fragment: &str) -> String {
    DocumentWrapper::default().wrap(fragment)
}
