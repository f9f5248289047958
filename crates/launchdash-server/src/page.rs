//! HTML rendering of the dashboard layout.
//!
//! The page is static markup plus a small script. The script loads the
//! callback graph from `/_dash-dependencies`, fires every callback once, and
//! re-fires the dependents of an input whenever that input changes.

use launchdash_core::layout::{Component, DashboardLayout};

/// plotly.js bundle loaded by the page.
pub const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Render the full page.
pub fn render_page(layout: &DashboardLayout) -> String {
    let mut body = String::new();
    render_component(&layout.root, &mut body);

    format!(
        r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <title>{title}</title>
    <script src="{plotly}"></script>
    <style>{STYLE}</style>
  </head>
  <body>
{body}
    <script>{RUNTIME}</script>
  </body>
</html>
"#,
        title = esc(&layout.title),
        plotly = PLOTLY_JS,
    )
}

/// Render one component and its children.
pub fn render_component(component: &Component, out: &mut String) {
    match component {
        Component::Div { children } => {
            out.push_str("<div>");
            for child in children {
                render_component(child, out);
            }
            out.push_str("</div>\n");
        }
        Component::H1 { text, style } => {
            let css: Vec<String> = style
                .iter()
                .map(|(k, v)| format!("{}:{}", css_property(k), v))
                .collect();
            out.push_str(&format!(
                "<h1 style=\"{}\">{}</h1>\n",
                esc(&css.join(";")),
                esc(text)
            ));
        }
        Component::P { text } => out.push_str(&format!("<p>{}</p>\n", esc(text))),
        Component::Br => out.push_str("<br />\n"),
        Component::Dropdown {
            id,
            options,
            value,
            placeholder,
            searchable,
        } => {
            out.push_str(&format!("<div class=\"dropdown\" data-for=\"{}\">", esc(id)));
            if *searchable {
                out.push_str(&format!(
                    "<input type=\"search\" class=\"dropdown-search\" placeholder=\"{}\" />",
                    esc(placeholder)
                ));
            }
            out.push_str(&format!(
                "<select id=\"{}\" data-input=\"value\" aria-label=\"{}\">",
                esc(id),
                esc(placeholder)
            ));
            for option in options {
                let selected = if option.value == *value { " selected" } else { "" };
                out.push_str(&format!(
                    "<option value=\"{}\"{}>{}</option>",
                    esc(&option.value),
                    selected,
                    esc(&option.label)
                ));
            }
            out.push_str("</select></div>\n");
        }
        Component::RangeSlider {
            id,
            min,
            max,
            step,
            marks,
            value,
        } => {
            let list_id = format!("{id}-marks");
            out.push_str(&format!(
                "<div id=\"{}\" class=\"range-slider\" data-input=\"value\">",
                esc(id)
            ));
            for (handle, current) in ["low", "high"].iter().zip(value.iter()) {
                out.push_str(&format!(
                    "<input type=\"range\" class=\"handle-{handle}\" min=\"{min}\" max=\"{max}\" \
                     step=\"{step}\" value=\"{current}\" list=\"{}\" />",
                    esc(&list_id)
                ));
            }
            out.push_str(&format!("<datalist id=\"{}\">", esc(&list_id)));
            for (position, label) in marks {
                out.push_str(&format!(
                    "<option value=\"{}\" label=\"{}\"></option>",
                    esc(position),
                    esc(label)
                ));
            }
            out.push_str(&format!(
                "</datalist><output class=\"range-value\">{} – {}</output></div>\n",
                value[0], value[1]
            ));
        }
        Component::Graph { id } => {
            out.push_str(&format!("<div id=\"{}\" class=\"graph\"></div>\n", esc(id)));
        }
    }
}

/// `textAlign` → `text-align`.
fn css_property(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
      body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 1100px; padding: 16px; }
      .dropdown { display: flex; gap: 8px; }
      .dropdown select, .dropdown input { font-size: 15px; padding: 6px; }
      .dropdown select { flex: 1; }
      .range-slider { display: grid; grid-template-columns: 1fr 1fr auto; gap: 8px; align-items: center; }
      .range-value { font-variant-numeric: tabular-nums; }
      .graph { min-height: 450px; }
"#;

const RUNTIME: &str = r#"
(async function () {
  const deps = await (await fetch('/_dash-dependencies')).json();

  function readValue(id) {
    const el = document.getElementById(id);
    if (el.tagName === 'SELECT') return el.value;
    const low = Number(el.querySelector('.handle-low').value);
    const high = Number(el.querySelector('.handle-high').value);
    return [Math.min(low, high), Math.max(low, high)];
  }

  async function fire(cb) {
    const output = cb.output.id + '.' + cb.output.property;
    const inputs = cb.inputs.map(i => ({ id: i.id, property: i.property, value: readValue(i.id) }));
    const resp = await fetch('/_dash-update-component', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ output, inputs }),
    });
    const body = await resp.json();
    if (!resp.ok) { console.error(output, body.error); return; }
    Plotly.react(cb.output.id, body.figure.data, body.figure.layout);
  }

  function onChange(id) {
    deps.callbacks.filter(cb => cb.inputs.some(i => i.id === id)).forEach(fire);
  }

  document.querySelectorAll('.dropdown').forEach(box => {
    const select = box.querySelector('select');
    const search = box.querySelector('.dropdown-search');
    select.addEventListener('change', () => onChange(select.id));
    if (search) {
      search.addEventListener('input', () => {
        const needle = search.value.toLowerCase();
        for (const opt of select.options) {
          opt.hidden = needle !== '' && !opt.text.toLowerCase().includes(needle);
        }
      });
    }
  });

  document.querySelectorAll('.range-slider').forEach(slider => {
    const label = slider.querySelector('.range-value');
    slider.querySelectorAll('input[type=range]').forEach(handle => {
      handle.addEventListener('input', () => {
        const [low, high] = readValue(slider.id);
        label.textContent = low + ' – ' + high;
      });
      handle.addEventListener('change', () => onChange(slider.id));
    });
  });

  deps.callbacks.forEach(fire);
})();
"#;
