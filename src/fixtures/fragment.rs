//! HTML status fragments returned by the upload fixture.

/// Returned when the uploaded file could not be stored.
pub const UPLOAD_FAILED: &str = concat!(
    "<table cellpadding=\"5\" width=\"80%\">\n",
    "<tr>\n",
    "<td align=\"Center\" colspan=\"2\"><font color=\"#C80000\"><b>File could not be uploaded</b></font></td>\n",
    "</tr>\n",
    "</table>\n",
);

/// Render the success fragment for a stored upload.
pub fn upload_succeeded(file_name: &str, size: &str, directory: &str) -> String {
    format!(
        concat!(
            "<table cellpadding=\"5\" width=\"300\">\n",
            "<tr>\n",
            "<td align=\"Center\" colspan=\"2\"><font color=\"#009900\"><b>Upload Successful</b></font></td>\n",
            "</tr>\n",
            "<tr>\n",
            "<td align=\"right\"><b>File Name: </b></td>\n",
            "<td align=\"left\">{name}</td>\n",
            "</tr>\n",
            "<tr>\n",
            "<td align=\"right\"><b>File Size: </b></td>\n",
            "<td align=\"left\">{size}</td>\n",
            "</tr>\n",
            "<tr>\n",
            "<td align=\"right\"><b>Directory: </b></td>\n",
            "<td align=\"left\">{directory}</td>\n",
            "</tr>\n",
            "</table>\n",
        ),
        name = escape(file_name),
        size = escape(size),
        directory = escape(directory),
    )
}

/// Escape text for use inside an HTML element.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_lists_all_three_values() {
        let html = upload_succeeded("NoDollar.txt", "1.5 MB", "uploads/");
        assert!(html.contains("<b>Upload Successful</b>"));
        assert!(html.contains("<td align=\"left\">NoDollar.txt</td>"));
        assert!(html.contains("<td align=\"left\">1.5 MB</td>"));
        assert!(html.contains("<td align=\"left\">uploads/</td>"));
    }

    #[test]
    fn success_escapes_markup_in_names() {
        let html = upload_succeeded("<script>.txt", "1 KB", "uploads/");
        assert!(html.contains("&lt;script&gt;.txt"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn success_keeps_quotes_in_names() {
        let html = upload_succeeded("John's \"notes\".txt", "1 KB", "uploads/");
        assert!(html.contains("<td align=\"left\">John's \"notes\".txt</td>"));
    }

    #[test]
    fn failure_is_fixed_text() {
        assert!(UPLOAD_FAILED.contains("File could not be uploaded"));
        assert!(UPLOAD_FAILED.starts_with("<table"));
        assert!(UPLOAD_FAILED.trim_end().ends_with("</table>"));
    }
}
