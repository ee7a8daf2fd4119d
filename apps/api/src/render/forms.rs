use maud::{html, Markup};

use super::page_shell;
use crate::llm_client::ModelCatalog;

/// Credential entry form. Posts `api_key` to `/api_key`.
pub fn api_key_page() -> Markup {
    let body = html! {
        main {
            h1 { "History Map" }
            div class="card" {
                form class="stack" method="post" action="/api_key" {
                    label for="api_key" { "OpenAI API key" }
                    input type="password" id="api_key" name="api_key" autocomplete="off" required;
                    button type="submit" { "Continue" }
                    p class="hint" { "The key is kept in your session only and cleared on logout." }
                }
            }
        }
    };

    page_shell("History Map: API key", html! {}, body)
}

/// Model picker. Posts `model` to `/select_model`; `current` is pre-checked.
pub fn select_model_page(catalog: &ModelCatalog, current: Option<&str>) -> Markup {
    let body = html! {
        main {
            h1 { "Choose a model" }
            div class="card" {
                form class="stack" method="post" action="/select_model" {
                    ul class="model-list" {
                        @for model in catalog.iter() {
                            li {
                                label {
                                    input type="radio" name="model" value=(model) required checked[current == Some(model)];
                                    (model)
                                }
                            }
                        }
                    }
                    button type="submit" { "Use this model" }
                    a href="/logout" { "Use a different API key" }
                }
            }
        }
    };

    page_shell("History Map: model", html! {}, body)
}
