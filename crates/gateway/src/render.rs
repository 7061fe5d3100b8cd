//! HTML views. Everything interpolated from a term goes through `escape`.

use service::graph::TermGraph;
use service::Term;

const STYLE: &str = r#"
    body{font-family:system-ui, -apple-system, Segoe UI, Roboto, Arial; margin: 40px; max-width: 960px;}
    .term{padding: 12px 0; border-bottom: 1px solid #eee;}
    code{background:#f6f8fa; padding:2px 4px; border-radius:4px;}
    a{text-decoration:none;}
    a:hover{text-decoration:underline;}
    .tags{color:#666; font-size: 0.9em;}
    input{padding:8px; width: min(420px, 90%);}
    button{padding:8px 12px;}
    pre{background:#f6f8fa; padding:12px; border-radius:8px; overflow:auto;}
"#;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

/// Shared page shell with the nav bar.
pub fn page(title: &str, body: &str) -> String {
    let title = escape(title);
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <style>{STYLE}</style>
</head>
<body>
  <h1>{title}</h1>
  <p><a href="/">Home</a> · <a href="/api/terms">API</a> · <a href="/graph">Graph</a></p>
  {body}
</body>
</html>"#
    )
}

fn search_form(q: &str) -> String {
    format!(
        r#"
<form method="get" action="/" style="margin: 16px 0 24px 0;">
  <input name="q" placeholder="Search terms and definitions..." value="{}" />
  <button type="submit">Search</button>
</form>
"#,
        escape(q)
    )
}

/// Home page: search form followed by one row per term.
pub fn term_list(terms: &[Term], q: &str) -> String {
    let mut body = search_form(q);
    if terms.is_empty() {
        body.push_str("<p>No terms found.</p>");
    }
    for t in terms {
        body.push_str(&format!(
            "<div class='term'><div><a href='/term/{id}'><b>{name}</b></a></div><div class='tags'>{tags}</div></div>",
            id = escape(&t.id),
            name = escape(&t.term),
            tags = escape(&t.tags.join(", ")),
        ));
    }
    body.push_str("<p style='margin-top:20px; color:#666'>Tip: open /api/terms for the JSON view.</p>");
    body
}

fn list_or_dash(items: Vec<String>) -> String {
    if items.is_empty() {
        "<li>—</li>".to_string()
    } else {
        items.concat()
    }
}

pub fn term_detail(t: &Term) -> String {
    let tags = if t.tags.is_empty() { "—".to_string() } else { escape(&t.tags.join(", ")) };
    let sources = t
        .sources
        .iter()
        .map(|s| {
            let s = escape(s);
            format!("<li><a href='{s}' target='_blank' rel='noreferrer'>{s}</a></li>")
        })
        .collect();
    let related = t
        .related_ids
        .iter()
        .map(|rid| {
            let rid = escape(rid);
            format!("<li><a href='/term/{rid}'><code>{rid}</code></a></li>")
        })
        .collect();

    format!(
        r#"
<div class='term'>
  <h2>{name}</h2>
  <p>{definition}</p>
  <p class='tags'><b>Tags:</b> {tags}</p>
  <h3>Sources</h3>
  <ul>{sources}</ul>
  <h3>Related terms (IDs)</h3>
  <ul>{related}</ul>
</div>
"#,
        name = escape(&t.term),
        definition = escape(&t.definition),
        sources = list_or_dash(sources),
        related = list_or_dash(related),
    )
}

/// Plain-text edge list, one `from -> to [label]` per line.
pub fn graph_text(graph: &TermGraph) -> String {
    let edges: Vec<String> = graph
        .edges
        .iter()
        .map(|e| format!("{} -> {} [{}]", escape(&e.from_id), escape(&e.to_id), escape(&e.label)))
        .collect();
    let text = if edges.is_empty() { "(no relations yet)".to_string() } else { edges.join("\n") };
    format!(
        "\n<p>Text rendering of the term graph ({} terms, {} relations).</p>\n<pre>{}</pre>\n",
        graph.nodes.len(),
        graph.edges.len(),
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
        assert_eq!(escape("Гидратация"), "Гидратация");
    }

    #[test]
    fn detail_escapes_and_uses_dashes_for_empty_lists() {
        let t = Term::new("<script>", "a & b").with_id("x1");
        let html = term_detail(&t);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
        assert_eq!(html.matches("<li>—</li>").count(), 2);
    }

    #[test]
    fn list_prefills_search_box() {
        let html = term_list(&[], "shadow \"dom\"");
        assert!(html.contains("value=\"shadow &quot;dom&quot;\""));
        assert!(html.contains("No terms found."));
    }
}
