use maud::{html, Markup, PreEscaped};

use super::page_shell;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

// Click → /get_location, year → /get_history, highlight → /handle_selected_text.
const DASHBOARD_JS: &str = r#"
const map = L.map('map').setView([48.85, 2.35], 4);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
  maxZoom: 19,
  attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);

const locationEl = document.getElementById('location');
const responseEl = document.getElementById('response');
const followupEl = document.getElementById('followup');
const yearEl = document.getElementById('year');
let marker = null;
let lastResponse = '';

async function postJson(path, body) {
  const res = await fetch(path, {
    method: 'POST',
    headers: {'Content-Type': 'application/json'},
    body: JSON.stringify(body)
  });
  if (res.redirected) { window.location = res.url; return null; }
  const isJson = (res.headers.get('content-type') || '').includes('application/json');
  if (!isJson) {
    const text = await res.text();
    if (!res.ok) { throw new Error(text || res.statusText); }
    return null;
  }
  const data = await res.json();
  if (!res.ok) { throw new Error(data.error ? data.error.message : res.statusText); }
  return data;
}

map.on('click', async (e) => {
  if (marker) { marker.setLatLng(e.latlng); } else { marker = L.marker(e.latlng).addTo(map); }
  locationEl.textContent = 'Looking up…';
  try {
    const data = await postJson('/get_location', {lat: e.latlng.lat, lon: e.latlng.lng, zoom: map.getZoom()});
    if (data) { locationEl.textContent = data.address; }
  } catch (err) {
    locationEl.textContent = 'Location unavailable: ' + err.message;
  }
});

document.getElementById('history-form').addEventListener('submit', async (e) => {
  e.preventDefault();
  const location = locationEl.textContent.trim();
  if (!location) { responseEl.textContent = 'Click the map to pick a place first.'; return; }
  responseEl.innerHTML = '<span class="status">Asking the historian…</span>';
  followupEl.textContent = '';
  try {
    const data = await postJson('/get_history', {location: location, year: yearEl.value});
    if (data) { lastResponse = data.response; responseEl.textContent = data.response; }
  } catch (err) {
    responseEl.textContent = 'Request failed: ' + err.message;
  }
});

responseEl.addEventListener('mouseup', async () => {
  const selected = window.getSelection().toString().trim();
  if (!selected || !lastResponse) { return; }
  followupEl.innerHTML = '<span class="status">Digging deeper…</span>';
  try {
    const data = await postJson('/handle_selected_text', {
      location: locationEl.textContent.trim(),
      year: yearEl.value,
      previous_response: lastResponse,
      selected_text: selected
    });
    if (data) { followupEl.textContent = data.response; }
  } catch (err) {
    followupEl.textContent = 'Request failed: ' + err.message;
  }
});
"#;

/// The map dashboard, shown only to Ready sessions.
pub fn dashboard_page(model: &str) -> Markup {
    let head = html! {
        link rel="stylesheet" href=(LEAFLET_CSS);
        script src=(LEAFLET_JS) {}
    };

    let body = html! {
        div class="dash" {
            div id="map" {}
            section class="side" {
                header {
                    h1 { "History Map" }
                    span class="model-tag" { (model) }
                }
                div id="location" {}
                form id="history-form" class="stack" {
                    input type="text" id="year" name="year" placeholder="Year or period, e.g. 1920s" required;
                    button type="submit" { "Tell me about it" }
                }
                div id="response" {}
                div id="followup" {}
                p class="hint" {
                    "Highlight part of the answer to ask a follow-up. "
                    a href="/select_model" { "Change model" }
                    " · "
                    a href="/logout" { "Log out" }
                }
            }
        }
        script { (PreEscaped(DASHBOARD_JS)) }
    };

    page_shell("History Map", head, body)
}
