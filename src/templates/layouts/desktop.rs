use maud::{html, Markup, DOCTYPE};

const HTMX_JS: &str = "https://unpkg.com/htmx.org@1.9.12";

const PAGE_CSS: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; color: #1f2937; }
header { display: flex; align-items: center; gap: 0.75rem; padding: 0.75rem 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,0.15); }
header h1 { font-size: 1.4rem; margin: 0; }
.layout { display: flex; min-height: calc(100vh - 60px); }
.sidebar { width: 280px; padding: 1rem 1.5rem; background: #f3f4f6; }
.sidebar select { width: 100%; min-height: 8rem; }
.sidebar label { display: block; font-weight: 600; margin: 1rem 0 0.25rem; }
.content { flex: 1; padding: 1rem; }
.content iframe { width: 100%; height: 600px; border: 1px solid #d1d5db; }
.warning { background: #fef3c7; color: #92400e; padding: 0.5rem 0.75rem; border-radius: 4px; margin-bottom: 0.75rem; }
.muted { color: #6b7280; font-size: 0.9rem; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PAGE_CSS) }
                script src=(HTMX_JS) defer {}
            }
            body {
              header {
                  svg
                      xmlns="http://www.w3.org/2000/svg"
                      width="24"
                      height="24"
                      viewBox="0 0 24 24"
                      fill="none"
                      stroke="#524ed2"
                      stroke-width="2"
                      stroke-linecap="round"
                      stroke-linejoin="round"
                  {
                      path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                      path d="M5 12l-2 0l9 -9l9 9l-2 0" {}
                      path d="M5 12v7a2 2 0 0 0 2 2h10a2 2 0 0 0 2 -2v-7" {}
                      path d="M9 21v-6a2 2 0 0 1 2 -2h2a2 2 0 0 1 2 2v6" {}
                  }
                  h1 { (title) }
              }
                (content)
            }
        }
    }
}
