use std::fmt::Write as _;

use architect_core::backlog::BacklogItem;
use architect_core::document::TrackingDocument;
use architect_core::phase::Phases;
use architect_core::store::DocumentStore;
use architect_core::tree::{self, Node};
use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::Extension;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;background:#f5f6f8;color:#1d2330}\
main{max-width:960px;margin:0 auto;padding:24px}\
header{display:flex;justify-content:space-between;align-items:center}\
section{background:#fff;border-radius:8px;padding:16px;margin:16px 0}\
ul.tree{list-style:none;padding-left:18px}\
.done>span{text-decoration:line-through;color:#8a93a6}\
.error{color:#b42318;margin-bottom:12px}\
pre{white-space:pre-wrap;background:#0f1420;color:#e6e9ef;padding:12px;border-radius:6px}";

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{}</title>\
         <style>{STYLE}</style></head><body><main>{body}</main></body></html>",
        escape_html(title)
    ))
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

/// GET /login
pub async fn login_page(Query(q): Query<LoginQuery>) -> Html<String> {
    let banner = if q.error.is_some() {
        "<div class=\"error\">Wrong username or password</div>"
    } else {
        ""
    };
    page(
        "Sign in",
        &format!(
            "<section><h1>Lovable Architect</h1>{banner}\
             <form method=\"post\" action=\"/login\">\
             <p><input name=\"username\" placeholder=\"Username\" autofocus></p>\
             <p><input name=\"password\" type=\"password\" placeholder=\"Password\"></p>\
             <p><button type=\"submit\">Sign in</button></p></form></section>"
        ),
    )
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

fn render_tree(out: &mut String, nodes: &[Node]) {
    out.push_str("<ul class=\"tree\">");
    for n in nodes {
        let class = if n.done { " class=\"done\"" } else { "" };
        let id = escape_html(&n.id);
        let _ = write!(
            out,
            "<li{class}><input type=\"checkbox\" data-op=\"toggle_done\" data-id=\"{id}\"{checked}> ",
            checked = if n.done { " checked" } else { "" },
        );
        if !n.is_leaf() {
            let _ = write!(
                out,
                "<a href=\"#\" data-op=\"toggle_expanded\" data-id=\"{id}\">{}</a> ",
                if n.expanded { "&#9662;" } else { "&#9656;" }
            );
        }
        let _ = write!(out, "<span>{id} {}</span>", escape_html(&n.title));
        if n.expanded && !n.children.is_empty() {
            render_tree(out, &n.children);
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}

fn render_phase_options(phases: &Phases) -> String {
    phases
        .iter()
        .map(|(key, p)| {
            format!(
                "<option value=\"{k}\">{k} - {} ({}%)</option>",
                escape_html(&p.name),
                p.progress(),
                k = escape_html(key)
            )
        })
        .collect()
}

fn render_phase_nav(phases: &Phases) -> String {
    let items: String = phases
        .iter()
        .map(|(key, p)| {
            format!(
                "<li>{} <span class=\"count\">{}</span></li>",
                escape_html(key),
                p.items.len()
            )
        })
        .collect();
    format!("<ul class=\"phases\">{items}</ul>")
}

fn render_backlog(items: &[BacklogItem]) -> String {
    if items.is_empty() {
        return "<p>Backlog is empty.</p>".to_string();
    }
    let rows: String = items
        .iter()
        .map(|i| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&i.feature),
                escape_html(&i.phase),
                i.priority.as_str(),
                i.status.as_str()
            )
        })
        .collect();
    format!("<table><tr><th>Feature</th><th>Phase</th><th>Priority</th><th>Status</th></tr>{rows}</table>")
}

const DASHBOARD_SCRIPT: &str = r#"<script>
document.querySelectorAll('[data-op]').forEach(el => {
  el.addEventListener('click', async ev => {
    if (el.tagName === 'A') ev.preventDefault();
    await fetch('/api/tree/ops', {
      method: 'POST',
      headers: {'Content-Type': 'application/json'},
      body: JSON.stringify({op: el.dataset.op, id: el.dataset.id})
    });
    location.reload();
  });
});
document.getElementById('generate').addEventListener('submit', async ev => {
  ev.preventDefault();
  const f = ev.target;
  const out = document.getElementById('prompt');
  out.textContent = 'Generating...';
  const res = await fetch('/api/architect', {
    method: 'POST',
    headers: {'Content-Type': 'application/json'},
    body: JSON.stringify({feature: f.feature.value, phase: f.phase.value, context: f.context.value || null, mode: f.mode.value})
  });
  const data = await res.json();
  out.textContent = res.ok ? data.prompt : (data.error || 'request failed');
});
</script>"#;

pub fn render_dashboard(user: &str, doc: &TrackingDocument, forest: &[Node]) -> String {
    let (done, total) = tree::progress(forest);
    let mut tree_html = String::new();
    render_tree(&mut tree_html, forest);
    format!(
        "<header><h1>{project}</h1><div>{user} &middot; <a href=\"/logout\">Sign out</a></div></header>\
         <section><h2>Generate prompt</h2><form id=\"generate\">\
         <p><input name=\"feature\" placeholder=\"Feature\" required></p>\
         <p><select name=\"phase\">{phases}</select> \
         <select name=\"mode\"><option value=\"command\">command</option><option value=\"blueprint\">blueprint</option></select></p>\
         <p><textarea name=\"context\" placeholder=\"Extra context\"></textarea></p>\
         <p><button type=\"submit\">Generate</button></p></form><pre id=\"prompt\"></pre></section>\
         <section><h2>Phases</h2>{nav}</section>\
         <section><h2>Roadmap ({done}/{total})</h2>{tree_html}</section>\
         <section><h2>Backlog</h2>{backlog}</section>{DASHBOARD_SCRIPT}",
        project = escape_html(&doc.project),
        user = escape_html(user),
        phases = render_phase_options(&doc.phases),
        nav = render_phase_nav(&doc.phases),
        backlog = render_backlog(&doc.backlog),
    )
}

/// GET /dashboard
pub async fn dashboard(
    State(app): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Html<String>, AppError> {
    let (doc, forest) = app
        .write(|s| {
            let forest = tree::load_forest(s)?;
            Ok((s.load()?, forest))
        })
        .await?;
    let title = doc.project.clone();
    Ok(page(&title, &render_dashboard(&user.0, &doc, &forest)))
}

/// GET /
pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}
