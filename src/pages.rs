//! Plain string-substitution HTML pages. Rendered note bodies are already
//! sanitized; everything else passes through [`escape`].

use crate::models::note::{Note, NoteMeta};

/// Escapes text for safe interpolation into HTML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

/// The page for a single note, with previous/next navigation.
pub fn note_page(note: &Note, previous: Option<&str>, next: Option<&str>) -> String {
    let mut nav = String::new();
    if let Some(id) = next {
        nav.push_str(&format!("<a href=\"/notes/{}\">&larr; newer</a> ", escape(id)));
    }
    if let Some(id) = previous {
        nav.push_str(&format!("<a href=\"/notes/{}\">older &rarr;</a>", escape(id)));
    }

    let body = format!(
        "<article>\n<h1>{}</h1>\n{}\n</article>\n<nav>{}</nav>",
        escape(&note.title),
        note.rendered_body,
        nav
    );
    layout(&note.title, &body)
}

/// The empty-state page shown when no notes exist yet.
pub fn empty_page() -> String {
    layout("inkpost", "<p>Nothing here yet.</p>")
}

/// The login form, optionally with an error line.
pub fn login_page(error: Option<&str>) -> String {
    let error_line = error
        .map(|msg| format!("<p>{}</p>\n", escape(msg)))
        .unwrap_or_default();
    let body = format!(
        "{}<form method=\"post\" action=\"/login\">\n\
         <input type=\"password\" name=\"secret\" autofocus>\n\
         <button type=\"submit\">Log in</button>\n</form>",
        error_line
    );
    layout("Log in", &body)
}

/// The admin listing of all notes, newest first.
pub fn admin_page(metas: &[NoteMeta]) -> String {
    let mut rows = String::new();
    for meta in metas {
        rows.push_str(&format!(
            "<li><a href=\"/admin/notes/{id}/edit\">{title}</a> \
             <small>{created}</small>\n\
             <form method=\"post\" action=\"/admin/notes/{id}/delete\">\
             <button type=\"submit\">delete</button></form></li>\n",
            id = escape(&meta.id),
            title = escape(&meta.title),
            created = meta.created_at.format("%Y-%m-%d %H:%M"),
        ));
    }

    let body = format!(
        "<h1>Notes</h1>\n<p><a href=\"/admin/notes/new\">New note</a></p>\n\
         <ul>\n{}</ul>\n\
         <form method=\"post\" action=\"/logout\"><button type=\"submit\">Log out</button></form>",
        rows
    );
    layout("Admin", &body)
}

/// The note editor, for both creation and editing.
pub fn editor_page(note: Option<&Note>) -> String {
    let (action, title, content) = match note {
        Some(note) => (
            format!("/admin/notes/{}", escape(&note.id)),
            escape(&note.title),
            escape(&note.content),
        ),
        None => ("/admin/notes".to_string(), String::new(), String::new()),
    };

    let body = format!(
        "<form method=\"post\" action=\"{}\">\n\
         <input type=\"text\" name=\"title\" value=\"{}\" placeholder=\"Title\">\n\
         <textarea name=\"content\" rows=\"24\" placeholder=\"Markdown\">{}</textarea>\n\
         <button type=\"submit\">Save</button>\n</form>\n\
         <p><a href=\"/admin\">Back</a></p>",
        action, title, content
    );
    layout("Edit note", &body)
}
