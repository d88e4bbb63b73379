//! Landing page.
//!
//! Serves the single-page DAIV.PRO marketing site at `/`. Navigation, the
//! section dots and the contact form are rendered from the catalogs in
//! `daiv-core`; the inline script drives the modal and the active-section
//! highlight with the same timings and threshold.

use std::sync::Arc;

use axum::response::Html;
use axum::routing::get;
use axum::Router;
use chrono::Datelike;
use serde_json::json;
use v_htmlescape::escape;

use daiv_core::lead::{FieldKind, FieldSpec, FIELDS};
use daiv_core::modal::{
    NETWORK_ERROR_MESSAGE, RESET_DELAY, SUCCESS_CLOSE_DELAY, SUCCESS_MESSAGE,
    UNKNOWN_ERROR_MESSAGE,
};
use daiv_core::sections::{Section, ACTIVATION_THRESHOLD, NAV_LINKS, SECTIONS};

use super::contact::CONTACT_PATH;
use crate::state::AppState;

/// Build the UI router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(landing_page))
}

// ── Landing page ─────────────────────────────────────────────────────

async fn landing_page() -> Html<String> {
    Html(render_landing(chrono::Utc::now().year()))
}

/// Render the full page with `year` in the footer.
pub fn render_landing(year: i32) -> String {
    let mut html = String::with_capacity(32768);
    html.push_str(LANDING_HEAD);
    html.push_str("<body>\n");
    html.push_str(&render_background());
    html.push_str("<main id=\"page\">\n");
    html.push_str(&render_nav());
    html.push_str(&render_dots(SECTIONS));
    html.push_str(&LANDING_SECTIONS.replace("{{YEAR}}", &year.to_string()));
    html.push_str(&MODAL.replace("{{FORM_FIELDS}}", &render_fields(FIELDS)));
    html.push_str("</main>\n");
    html.push_str(&format!(
        "<script type=\"application/json\" id=\"page-config\">{}</script>\n",
        page_config()
    ));
    html.push_str(LANDING_SCRIPT);
    html.push_str("</body></html>\n");
    html
}

/// Settings shared with the inline script.
fn page_config() -> serde_json::Value {
    json!({
        "endpoint": CONTACT_PATH,
        "threshold": ACTIVATION_THRESHOLD,
        "successCloseMs": SUCCESS_CLOSE_DELAY.as_millis(),
        "resetMs": RESET_DELAY.as_millis(),
        "messages": {
            "success": SUCCESS_MESSAGE,
            "unknownError": UNKNOWN_ERROR_MESSAGE,
            "networkError": NETWORK_ERROR_MESSAGE,
        },
    })
}

/// Paths drawn per background layer.
const BACKGROUND_PATHS: i32 = 30;

/// Fixed backdrop of slowly drifting curves, two mirrored layers.
fn render_background() -> String {
    let mut html = String::from("<div class=\"backdrop\" aria-hidden=\"true\">");
    for position in [1, -1] {
        html.push_str(
            "<svg viewBox=\"0 0 696 875\" fill=\"none\" preserveAspectRatio=\"xMidYMid slice\">",
        );
        for i in 0..BACKGROUND_PATHS {
            let shift = i * 5 * position;
            let d = format!(
                "M-{} -{}C-{} -{} -{} {} {} {}C{} {} {} {} {} {}",
                380 - shift,
                189 + i * 6,
                380 - shift,
                189 + i * 6,
                312 - shift,
                216 - i * 6,
                152 - shift,
                343 - i * 6,
                616 - shift,
                470 - i * 6,
                684 - shift,
                875 - i * 6,
                684 - shift,
                875 - i * 6,
            );
            let step = f64::from(i);
            html.push_str(&format!(
                "<path d=\"{d}\" pathLength=\"1\" stroke=\"rgba(255,255,255,{opacity:.3})\" stroke-width=\"{width:.2}\" style=\"animation-duration:{secs}s\"/>",
                opacity = 0.01 + step * 0.008,
                width = 0.4 + step * 0.02,
                secs = 40 + (i * 7) % 25,
            ));
        }
        html.push_str("</svg>");
    }
    html.push_str("</div>\n");
    html
}

fn render_nav() -> String {
    let links: String = NAV_LINKS
        .iter()
        .map(|link| {
            format!(
                "<a href=\"#{id}\" data-scroll=\"{id}\">{label}</a>",
                id = escape(link.id),
                label = escape(link.label)
            )
        })
        .collect();

    NAV.replace("{{NAV_LINKS}}", &links)
}

fn render_dots(sections: &[Section]) -> String {
    let mut html = String::from("<nav class=\"dots\" aria-label=\"Sections\">");
    for (i, section) in sections.iter().enumerate() {
        html.push_str(&format!(
            "<a href=\"#{id}\" data-scroll=\"{id}\" data-section=\"{id}\" title=\"{label}\" aria-label=\"{label}\"{active}></a>",
            id = escape(section.id),
            label = escape(section.label),
            active = if i == 0 { " class=\"active\"" } else { "" }
        ));
    }
    html.push_str("</nav>\n");
    html
}

fn render_fields(fields: &[FieldSpec]) -> String {
    let mut html = String::new();
    for field in fields {
        let id = format!("contact-{}", field.name);
        let name = escape(field.name);
        let required = if field.required { " required" } else { "" };
        let optional = if field.required {
            ""
        } else {
            " <span class=\"optional\">(Optional)</span>"
        };

        html.push_str(&format!(
            "<div class=\"field\"><label for=\"{id}\">{label}{optional}</label>",
            label = escape(field.label)
        ));

        let control = match field.kind {
            FieldKind::Text | FieldKind::Email | FieldKind::Tel | FieldKind::Url => {
                let kind = match field.kind {
                    FieldKind::Email => "email",
                    FieldKind::Tel => "tel",
                    FieldKind::Url => "url",
                    _ => "text",
                };
                format!(
                    "<input type=\"{kind}\" name=\"{name}\" id=\"{id}\" placeholder=\"{placeholder}\"{required}/>",
                    placeholder = escape(field.placeholder)
                )
            }
            FieldKind::TextArea { rows } => format!(
                "<textarea name=\"{name}\" id=\"{id}\" rows=\"{rows}\" placeholder=\"{placeholder}\"{required}></textarea>",
                placeholder = escape(field.placeholder)
            ),
            FieldKind::Select { prompt, options } => {
                let mut select = format!(
                    "<select name=\"{name}\" id=\"{id}\"{required}><option value=\"\" disabled selected>{}</option>",
                    escape(prompt)
                );
                for option in options {
                    select.push_str(&format!(
                        "<option value=\"{}\">{}</option>",
                        escape(option.value),
                        escape(option.label)
                    ));
                }
                select.push_str("</select>");
                select
            }
        };

        html.push_str(&control);
        html.push_str("</div>\n");
    }
    html
}

/// Document head and styles.
const LANDING_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"/><meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>DAIV.PRO - AI Automation for Business Efficiency</title>
<meta name="description" content="Stop drowning in repetitive tasks. DAIV.PRO offers custom AI automation to streamline your operations, handle leads, and scale your business effortlessly. Get your free automation analysis."/>
<meta property="og:title" content="DAIV.PRO - AI Automation for Business Efficiency"/>
<meta property="og:type" content="website"/>
<link rel="preconnect" href="https://fonts.googleapis.com"/>
<link rel="preconnect" href="https://fonts.gstatic.com" crossorigin/>
<link href="https://fonts.googleapis.com/css2?family=IBM+Plex+Sans:wght@400;500;600;700&family=Orbitron:wght@500;700&display=swap" rel="stylesheet"/>
<style>
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
:root{--primary:#4527A0;--secondary:#FF4081;--text:#FFFFFF;--text-muted:rgba(255,255,255,.8);--glass:rgba(255,255,255,.05);--glass-border:rgba(255,255,255,.1);--font:'IBM Plex Sans',-apple-system,sans-serif;--display:'Orbitron',sans-serif}
html,body{height:100%}
body{font-family:var(--font);background:radial-gradient(ellipse at top,#5E35B1 0%,var(--primary) 45%,#1A0B4B 100%) fixed;color:var(--text);line-height:1.6;-webkit-font-smoothing:antialiased}
a{color:inherit;text-decoration:none}
.backdrop{position:fixed;inset:0;z-index:-1;pointer-events:none;overflow:hidden}
.backdrop svg{position:absolute;inset:0;width:100%;height:100%}
.backdrop path{stroke-dasharray:.6 .4;opacity:.4;animation:drift 50s linear infinite}
@keyframes drift{0%{stroke-dashoffset:0;opacity:.25}50%{stroke-dashoffset:-1;opacity:.5}100%{stroke-dashoffset:-2;opacity:.35}}
@media(prefers-reduced-motion:reduce){.backdrop path{animation:none}}
main{height:100vh;overflow-y:scroll;scroll-snap-type:y mandatory;scroll-behavior:smooth}
.nav{position:fixed;top:0;left:0;right:0;z-index:40;display:flex;align-items:center;justify-content:space-between;padding:16px 24px;background:rgba(69,39,160,.6);backdrop-filter:blur(10px)}
.nav-logo{display:flex;align-items:center;gap:10px;font-family:var(--display);font-size:20px}
.nav-logo svg{width:32px;height:32px}
.nav-links{display:flex;gap:8px}
.nav-links a{font-size:14px;font-weight:500;padding:8px 14px;border-radius:8px;color:var(--text-muted);transition:all .2s}
.nav-links a:hover{color:var(--text);background:rgba(255,255,255,.08)}
.menu-toggle{display:none;background:none;border:none;color:var(--text);cursor:pointer;padding:6px}
.menu-toggle svg{width:24px;height:24px}
.mobile-menu{display:none;position:fixed;top:64px;left:0;right:0;z-index:39;flex-direction:column;padding:8px 24px 16px;background:rgba(69,39,160,.95)}
.mobile-menu.open{display:flex}
.mobile-menu a{padding:10px 0;border-bottom:1px solid var(--glass-border)}
.dots{position:fixed;right:20px;top:50%;transform:translateY(-50%);z-index:30;display:flex;flex-direction:column;gap:14px}
.dots a{width:12px;height:12px;border-radius:50%;background:rgba(255,255,255,.3);transition:all .3s}
.dots a.active{background:var(--secondary);transform:scale(1.3)}
section{min-height:100vh;scroll-snap-align:start;display:flex;flex-direction:column;justify-content:center;align-items:center;padding:96px 24px 48px;text-align:center}
h1{font-size:56px;font-weight:500;line-height:1.2;margin-bottom:16px}
h2{font-size:44px;font-weight:500;line-height:1.4;margin-bottom:48px;max-width:900px}
.lead{font-size:20px;color:var(--text-muted);margin-bottom:32px}
.btn{display:inline-block;background:var(--secondary);color:#fff;border:none;border-radius:10px;padding:14px 32px;font-family:var(--font);font-size:16px;font-weight:500;cursor:pointer;transition:opacity .2s}
.btn:hover{opacity:.9}.btn:disabled{opacity:.6;cursor:not-allowed}
.hero{display:grid;grid-template-columns:1fr 400px;gap:48px;align-items:center;max-width:1100px;text-align:left}
.chat{background:var(--glass);border:1px solid var(--glass-border);border-radius:20px;padding:20px;backdrop-filter:blur(8px)}
.chat h3{font-size:14px;color:var(--text-muted);margin-bottom:12px}
.bubble{border-radius:14px;padding:10px 14px;font-size:14px;margin-bottom:10px;max-width:85%}
.bubble.user{background:var(--secondary);margin-left:auto}
.bubble.bot{background:rgba(255,255,255,.1)}
.prose{max-width:760px}.prose p{font-size:22px;color:var(--text-muted);margin-bottom:20px}
.cards{display:grid;grid-template-columns:repeat(3,1fr);gap:20px;max-width:1100px}
.card{background:var(--glass);border:1px solid var(--glass-border);border-radius:18px;padding:28px;text-align:left}
.card h3{font-size:22px;font-weight:500;margin-bottom:10px}.card p{color:var(--text-muted)}
.benefits{display:grid;grid-template-columns:repeat(2,1fr);gap:32px 48px;max-width:1000px;text-align:left}
.benefit{display:flex;gap:16px}.benefit .num{font-family:var(--display);color:var(--secondary);font-size:20px;padding-top:4px}
.benefit h3{font-size:22px;font-weight:500;margin-bottom:6px}.benefit p{color:var(--text-muted)}.benefit p+p{margin-top:8px}
.brand{font-family:var(--display)}
.footer{scroll-snap-align:end;padding:32px 24px;text-align:center;font-size:14px;color:rgba(255,255,255,.7)}
.footer p+p{margin-top:8px}
.modal{position:fixed;inset:0;z-index:50;display:flex;align-items:center;justify-content:center;padding:16px;background:rgba(0,0,0,.6);backdrop-filter:blur(4px);transition:opacity .5s}
.modal[hidden]{display:none}
.modal-panel{position:relative;width:100%;max-width:560px;max-height:90vh;overflow-y:auto;background:var(--primary);border:1px solid var(--glass-border);border-radius:20px;padding:32px}
.modal-close{position:absolute;top:14px;right:14px;background:none;border:none;color:var(--text-muted);font-size:24px;cursor:pointer}
.modal-close:disabled{opacity:.4;cursor:not-allowed}
.modal h2{font-family:var(--display);font-size:26px;margin-bottom:8px}
.modal .intro{font-size:14px;color:var(--text-muted);text-align:center}
.modal .promise{font-size:12px;color:var(--secondary);text-align:center;font-weight:500;margin:8px 0 20px}
.field{margin-bottom:14px;text-align:left}
.field label{display:block;font-size:14px;font-weight:500;margin-bottom:4px;color:rgba(255,255,255,.9)}
.field .optional{color:rgba(255,255,255,.5)}
.field input,.field textarea,.field select{width:100%;background:var(--glass);color:var(--text);border:1px solid var(--glass-border);border-radius:10px;padding:10px 12px;font-family:var(--font);font-size:14px;outline:none}
.field select option{color:#1A0B4B}
.field input:focus,.field textarea:focus,.field select:focus{border-color:var(--secondary)}
.form-error{color:#EF4444;font-size:14px;text-align:center;margin-top:12px}
.modal .btn{width:100%;margin-top:8px}
.success{text-align:center;padding:24px 0}.success p{color:var(--text-muted)}
@media(max-width:1024px){.hero{grid-template-columns:1fr;text-align:center}.chat{display:none}}
@media(max-width:768px){h1{font-size:36px}h2{font-size:30px;margin-bottom:32px}.prose p{font-size:17px}.cards,.benefits{grid-template-columns:1fr}.nav-links{display:none}.menu-toggle{display:block}.dots{right:10px}}
</style></head>
"##;

/// Fixed top navigation; links are filled in from the navigation catalog.
const NAV: &str = r##"<nav class="nav">
  <a href="#home" data-scroll="home" class="nav-logo">
    <svg viewBox="0 0 32 32" fill="none"><rect width="32" height="32" rx="8" fill="#FF4081"/><path d="M9 8h7a8 8 0 010 16H9z" stroke="#fff" stroke-width="2.5" stroke-linejoin="round"/></svg>
    <span>DAIV.PRO</span>
  </a>
  <div class="nav-links">{{NAV_LINKS}}</div>
  <button type="button" class="menu-toggle" id="menu-toggle" aria-controls="mobile-menu" aria-expanded="false">
    <span class="sr-only" hidden>Open main menu</span>
    <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M4 6h16M4 12h16M4 18h16"/></svg>
  </button>
</nav>
<div class="mobile-menu" id="mobile-menu">{{NAV_LINKS}}</div>
"##;

/// Page sections and footer.
const LANDING_SECTIONS: &str = r##"<section id="home">
  <div class="hero">
    <div>
      <h1>Supercharge your Business with AI</h1>
      <p class="lead">Focus on what you do best, while we handle the rest.</p>
      <button type="button" class="btn" data-open-modal>Get Started</button>
    </div>
    <div class="chat" aria-hidden="true">
      <h3>DAIV Assistant</h3>
      <div class="bubble user">How can I grow faster?</div>
      <div class="bubble bot">By automating the work that's slowing you down.</div>
      <div class="bubble bot">I'll help you capture leads, follow up instantly, and scale your operations, all on autopilot.</div>
      <div class="bubble bot">No burnout. No missed opportunities. Just growth.</div>
      <div class="bubble user">Let's do it!</div>
    </div>
  </div>
</section>
<section id="problem">
  <h2>You didn't start your business to drown in repetitive tasks…</h2>
  <div class="prose">
    <p>…but now you're spending <strong>hours</strong> replying to leads, moving data, sending follow-ups, and switching tabs like a full-time operator.</p>
    <p>And the <strong>worst</strong> part? These tasks don't scale, and they're stealing time from what really matters: <strong>growing your business.</strong></p>
  </div>
</section>
<section id="operations-dilemma">
  <h2>So how do you get the most out of your operations?</h2>
  <div class="cards">
    <div class="card"><h3>Do everything yourself?</h3><p>If you've got the time to learn automation tools and set everything up yourself, it can work. However, if you're already juggling a hundred tasks… that just isn't feasible.</p></div>
    <div class="card"><h3>Hire new staff?</h3><p>It's an option, but finding the right person is tough. And expecting them to compete with AI at what it does best (automation) is an uphill battle.</p></div>
    <div class="card"><h3>Hire an agency?</h3><p>Unless you have a large monthly budget, chances are your business gets passed down the chain. Before long, your operations are being managed by the assistant's assistant's intern.</p></div>
  </div>
</section>
<section id="benefits">
  <h2>But why <span class="brand">DAIV.PRO</span>?</h2>
  <div class="benefits">
    <div class="benefit"><span class="num">01</span><div><h3>Guarantee</h3><p>You grow, or we don't.</p><p>We believe in aligned incentives, which means you won't carry all the risk.</p><p>We're in this with you.</p></div></div>
    <div class="benefit"><span class="num">02</span><div><h3>Speed. Simplicity. Scale.</h3><p>We're not here to add noise. We're here to build systems that quietly work and deliver.</p></div></div>
    <div class="benefit"><span class="num">03</span><div><h3>Local</h3><p>We're right here: a local team that understands your market and actually picks up the phone.</p></div></div>
    <div class="benefit"><span class="num">04</span><div><h3>Specialized</h3><p>We don't do everything.</p><p>We focus on one thing: AI-powered automation that actually saves you time.</p><p>That's why we get results.</p></div></div>
  </div>
</section>
<section id="contact">
  <h2 class="brand">Get Started</h2>
  <p class="lead">Join our community of forward-thinking businesses leveraging AI to transform their operations.<br/>Start now to receive a free e-book on how to use ChatGPT like a <strong class="brand">PRO</strong>.</p>
  <button type="button" class="btn" data-open-modal>Get Started</button>
</section>
<footer class="footer">
  <p>&copy; {{YEAR}} DAIV.PRO. All rights reserved.</p>
  <p>Efficient AI Automation by DAIV.PRO</p>
</footer>
"##;

/// Contact modal; `{{FORM_FIELDS}}` is replaced with the rendered form.
const MODAL: &str = r##"<div class="modal" id="contact-modal" role="dialog" aria-modal="true" aria-labelledby="contact-title" hidden>
  <div class="modal-panel">
    <button type="button" class="modal-close" id="modal-close" aria-label="Close modal">&times;</button>
    <div class="success" id="modal-success" hidden>
      <h2>All Set!</h2>
      <p id="success-message"></p>
    </div>
    <div id="modal-form-view">
      <h2 id="contact-title">You’re Bleeding Time. Let Us Fix It</h2>
      <p class="intro">Fill this out and receive a free ChatGPT super guide.</p>
      <p class="promise">No costs, no obligations.</p>
      <form id="contact-form" novalidate>
{{FORM_FIELDS}}        <button type="submit" class="btn" id="contact-submit">GET THE CHATGPT SUPER GUIDE</button>
        <p class="form-error" id="form-error" role="alert" hidden></p>
      </form>
    </div>
  </div>
</div>
"##;

/// Modal state machine and active-section tracking.
const LANDING_SCRIPT: &str = r##"<script>
(function () {
  'use strict';
  var cfg = JSON.parse(document.getElementById('page-config').textContent);

  // Active section: the last section to cross the threshold wins.
  var dots = document.querySelectorAll('.dots a');
  function activate(id) {
    dots.forEach(function (d) { d.classList.toggle('active', d.dataset.section === id); });
  }
  if ('IntersectionObserver' in window) {
    var observer = new IntersectionObserver(function (entries) {
      entries.forEach(function (e) {
        if (e.isIntersecting && e.intersectionRatio >= cfg.threshold) activate(e.target.id);
      });
    }, { threshold: cfg.threshold });
    document.querySelectorAll('main > section').forEach(function (s) { observer.observe(s); });
  }

  var menu = document.getElementById('mobile-menu');
  var toggle = document.getElementById('menu-toggle');
  toggle.addEventListener('click', function () {
    var open = menu.classList.toggle('open');
    toggle.setAttribute('aria-expanded', String(open));
  });
  document.querySelectorAll('[data-scroll]').forEach(function (a) {
    a.addEventListener('click', function (ev) {
      var target = document.getElementById(a.dataset.scroll);
      if (!target) return;
      ev.preventDefault();
      target.scrollIntoView({ behavior: 'smooth', block: 'start' });
      menu.classList.remove('open');
      toggle.setAttribute('aria-expanded', 'false');
    });
  });

  // Contact modal: closed, idle, submitting, success, error.
  var modal = document.getElementById('contact-modal');
  var form = document.getElementById('contact-form');
  var formView = document.getElementById('modal-form-view');
  var successView = document.getElementById('modal-success');
  var successText = document.getElementById('success-message');
  var errorText = document.getElementById('form-error');
  var submit = document.getElementById('contact-submit');
  var closeButton = document.getElementById('modal-close');
  var submitLabel = submit.textContent;
  var state = 'closed';
  var message = '';
  var generation = 0;

  function render() {
    var busy = state === 'submitting';
    modal.hidden = state === 'closed';
    formView.hidden = state === 'success';
    successView.hidden = state !== 'success';
    successText.textContent = state === 'success' ? message : '';
    errorText.hidden = state !== 'error';
    errorText.textContent = state === 'error' ? message : '';
    submit.disabled = busy;
    submit.textContent = busy ? 'Submitting...' : submitLabel;
    closeButton.disabled = busy;
    Array.prototype.forEach.call(form.elements, function (el) {
      if (el !== submit) el.disabled = busy;
    });
  }

  function open() {
    if (state !== 'closed') return;
    generation += 1;
    state = 'idle';
    message = '';
    render();
  }

  function close() {
    if (state === 'closed' || state === 'submitting') return;
    generation += 1;
    state = 'closed';
    message = '';
    render();
  }

  function resolve(next, text) {
    state = next;
    message = text;
    render();
    if (next !== 'success') return;
    var ticket = generation;
    setTimeout(function () {
      if (state !== 'success' || ticket !== generation) return;
      close();
      setTimeout(function () { form.reset(); }, cfg.resetMs);
    }, cfg.successCloseMs);
  }

  document.querySelectorAll('[data-open-modal]').forEach(function (b) {
    b.addEventListener('click', open);
  });
  closeButton.addEventListener('click', close);
  modal.addEventListener('click', function (ev) { if (ev.target === modal) close(); });
  document.addEventListener('keydown', function (ev) { if (ev.key === 'Escape') close(); });

  form.addEventListener('submit', function (ev) {
    ev.preventDefault();
    if (state !== 'idle' && state !== 'error') return;
    if (!form.checkValidity()) { form.reportValidity(); return; }
    var data = {};
    new FormData(form).forEach(function (value, key) { data[key] = value; });
    state = 'submitting';
    render();
    fetch(cfg.endpoint, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(data)
    }).then(function (res) {
      return res.json().then(function (body) {
        if (res.ok) resolve('success', cfg.messages.success);
        else resolve('error', (body && body.message) || cfg.messages.unknownError);
      });
    }).catch(function () {
      resolve('error', cfg.messages.networkError);
    });
  });
})();
</script>
"##;
