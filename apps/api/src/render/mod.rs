//! Server-rendered HTML pages.
//!
//! All rendering uses maud; dynamic values (model ids, etc.) are escaped.

pub mod dashboard;
pub mod forms;

use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Inline CSS shared by every page.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#f7f5f0;--fg:#1d1b16;--fg2:#5b574c;--accent:#8a5a00;--border:rgba(138,90,0,.2);--surface:#fff}
body{font-family:Georgia,"Times New Roman",serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh}
main{max-width:720px;margin:0 auto;padding:2rem 1rem}
h1{font-size:1.6rem;margin-bottom:1rem}
a{color:var(--accent)}
.card{background:var(--surface);border:1px solid var(--border);border-radius:10px;padding:1.5rem}
form.stack{display:flex;flex-direction:column;gap:.75rem}
input[type=text],input[type=password],input[type=number]{padding:.5rem .65rem;border:1px solid var(--border);border-radius:6px;font-size:1rem}
button{padding:.5rem 1rem;background:var(--accent);color:#fff;border:none;border-radius:6px;font-size:1rem;cursor:pointer}
.model-list{list-style:none;display:flex;flex-direction:column;gap:.35rem;max-height:60vh;overflow-y:auto}
.model-list label{display:flex;gap:.5rem;align-items:center;font-family:ui-monospace,Menlo,monospace;font-size:.9rem}
.hint{color:var(--fg2);font-size:.9rem}

.dash{display:grid;grid-template-columns:minmax(0,3fr) minmax(0,2fr);height:100vh}
#map{height:100%;width:100%}
.side{display:flex;flex-direction:column;gap:.75rem;padding:1rem;overflow-y:auto;border-left:1px solid var(--border);background:var(--surface)}
.side header{display:flex;justify-content:space-between;align-items:baseline;gap:.5rem}
.model-tag{font-family:ui-monospace,Menlo,monospace;font-size:.8rem;color:var(--fg2)}
#location{font-weight:600;min-height:1.6em}
#response{white-space:pre-wrap;word-break:break-word}
#followup{border-top:1px solid var(--border);padding-top:.75rem;white-space:pre-wrap;word-break:break-word}
.status{color:var(--fg2);font-style:italic}
"#;

/// Wraps page content in the shared HTML document shell.
pub fn page_shell(title: &str, head_extra: Markup, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(PAGE_CSS)) }
                (head_extra)
            }
            body { (body) }
        }
    }
}
