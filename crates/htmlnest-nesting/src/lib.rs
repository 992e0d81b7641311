mod errors;
mod verifier;
mod void;

pub use errors::NestingError;
pub use verifier::verify;
pub use verifier::verify_with;
pub use verifier::Verifier;
pub use verifier::VerifyOptions;
pub use void::is_void;
pub use void::VOID_ELEMENTS;

/// Tokenize `source` and verify its tag nesting.
///
/// Every structural defect is returned, in report order.
#[must_use]
pub fn check_source(source: &str, options: &VerifyOptions) -> Vec<NestingError> {
    let events = htmlnest_markup::tokenize(source);
    tracing::trace!(events = events.len(), "tokenized document");
    verify_with(events, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(source: &str) -> Vec<String> {
        check_source(source, &VerifyOptions::default())
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn well_formed_document_is_clean() {
        let source = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <link rel="stylesheet" href="site.css">
  <title>Home</title>
  <script>if (a < b && c > d) { document.write("<p>"); }</script>
</head>
<body>
  <!-- <section> -->
  <img src="logo.png" alt="">
  <br/>
  <P>Hello <B>world</b></p>
</body>
</html>
"#;
        assert!(check(source).is_empty());
    }

    #[test]
    fn reports_lines_and_columns() {
        let source = "<div>\n  <span>\n</div>\n";
        assert_eq!(
            check(source),
            vec![
                "Mismatched closing </div> at (3, 0), expected </span> from (2, 2)",
                "Unclosed <div> opened at (1, 0)",
            ]
        );
    }

    #[test]
    fn unexpected_close_in_document() {
        assert_eq!(
            check("<p></p>\n</em>"),
            vec!["Unexpected closing </em> at (2, 0)"]
        );
    }

    #[test]
    fn unclosed_inside_raw_text() {
        assert_eq!(
            check("<style>p { color: red }"),
            vec!["Unclosed <style> opened at (1, 0)"]
        );
    }

    #[test]
    fn unfinished_markup_at_end_keeps_nesting_errors() {
        assert_eq!(
            check("<div>\n<!-- oops"),
            vec!["Unclosed <div> opened at (1, 0)"]
        );
        assert_eq!(check("<p>x</p"), vec!["Unclosed <p> opened at (1, 0)"]);
        assert_eq!(
            check("<main>\n<section class=\"x"),
            vec!["Unclosed <main> opened at (1, 0)"]
        );
    }

    #[test]
    fn unquoted_value_ending_in_slash_is_not_self_closing() {
        assert!(check("<a href=/>Home</a>").is_empty());
        assert!(check("<nav><a href=/docs/>Docs</a></nav>").is_empty());
    }

    #[test]
    fn minified_document_on_one_line() {
        let mut source = "<ul>".to_string();
        source.push_str(&"<li><a href=/x/>x</a></li>".repeat(20_000));
        source.push_str("</ol>");
        let errors = check(&source);
        assert_eq!(
            errors,
            vec![format!(
                "Mismatched closing </ol> at (1, {}), expected </ul> from (1, 0)",
                4 + 26 * 20_000
            )]
        );
    }
}
