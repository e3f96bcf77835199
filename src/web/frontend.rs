//! Embedded HTML/CSS/JS frontend for the launch dashboard.
//!
//! The entire SPA is compiled into the binary as a string constant; only
//! plotly.js is pulled from its CDN. It renders the layout tree from
//! `/api/layout`, forwards every widget change to `/api/callback`, and hands
//! each published figure to `Plotly.react`.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Launch Records Dashboard</title>
<script src="https://cdn.plot.ly/plotly-2.35.0.min.js"></script>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --yellow: #d29922;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

.app {
  max-width: 1100px;
  margin: 0 auto;
  padding: 24px;
}

h1 {
  font-size: 24px;
  font-weight: 600;
  margin-bottom: 20px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}

p { color: var(--text-muted); margin: 8px 0; }

/* Dropdown */
.dropdown { display: flex; flex-direction: column; gap: 6px; }
.dropdown input, .dropdown select {
  background: var(--surface);
  color: var(--text);
  border: 1px solid var(--border);
  border-radius: 6px;
  padding: 8px 10px;
  font-size: 13px;
  font-family: var(--font);
}
.dropdown input:focus, .dropdown select:focus { outline: none; border-color: var(--accent); }

/* Chart cards */
.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  margin-bottom: 16px;
}
.card .warning { color: var(--yellow); font-size: 12px; }
.card .warning:empty { display: none; }
.card .plot { width: 100%; min-height: 360px; }

/* Range slider */
.range { position: relative; height: 56px; margin: 8px 0 16px; }
.range input[type=range] {
  position: absolute;
  width: 100%;
  top: 0;
  pointer-events: none;
  background: none;
  -webkit-appearance: none;
  appearance: none;
}
.range input[type=range]::-webkit-slider-thumb { pointer-events: all; cursor: pointer; }
.range input[type=range]::-moz-range-thumb { pointer-events: all; cursor: pointer; }
.range .marks { position: absolute; top: 26px; left: 0; right: 0; height: 20px; }
.range .marks span {
  position: absolute;
  transform: translateX(-50%);
  font-size: 11px;
  font-family: var(--mono);
  color: var(--text-muted);
}
.range .value { position: absolute; right: 0; top: 40px; font-size: 12px; font-family: var(--mono); color: var(--accent); }
</style>
</head>
<body>
<div class="app" id="app"></div>

<script>
// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------
const state = { site: 'ALL', payload: [0, 0] };

// ---------------------------------------------------------------------------
// API helpers
// ---------------------------------------------------------------------------
async function api(method, path, body) {
  const opts = { method, headers: {} };
  if (body) {
    opts.headers['Content-Type'] = 'application/json';
    opts.body = JSON.stringify(body);
  }
  const res = await fetch(path, opts);
  return res.json();
}

async function fire(trigger) {
  const res = await api('POST', '/api/callback', {
    trigger, site: state.site, payload: state.payload,
  });
  if (res.error) { console.error(res.error); return; }
  for (const pub of res.publications) drawFigure(pub);
}

function esc(s) {
  return String(s).replace(/[&<>"]/g, c => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;' }[c]));
}

// ---------------------------------------------------------------------------
// Layout rendering
// ---------------------------------------------------------------------------
function render(node) {
  switch (node.type) {
    case 'container': {
      const el = document.createElement('div');
      node.children.forEach(c => el.appendChild(render(c)));
      return el;
    }
    case 'heading': {
      const el = document.createElement('h1');
      el.textContent = node.text;
      el.style.textAlign = node.align;
      return el;
    }
    case 'paragraph': {
      const el = document.createElement('p');
      el.textContent = node.text;
      return el;
    }
    case 'break':
      return document.createElement('br');
    case 'graph': {
      const el = document.createElement('div');
      el.className = 'card';
      el.id = node.id;
      return el;
    }
    case 'dropdown':
      return renderDropdown(node);
    case 'range_slider':
      return renderSlider(node);
    default:
      return document.createElement('div');
  }
}

function renderDropdown(node) {
  const wrap = document.createElement('div');
  wrap.className = 'dropdown';
  const select = document.createElement('select');
  select.id = node.id;
  const fill = (filter) => {
    const q = filter.toLowerCase();
    select.innerHTML = node.options
      .filter(o => !q || o.label.toLowerCase().includes(q) || o.value === state.site)
      .map(o => `<option value="${esc(o.value)}"${o.value === state.site ? ' selected' : ''}>${esc(o.label)}</option>`)
      .join('');
  };
  if (node.searchable) {
    const search = document.createElement('input');
    search.type = 'search';
    search.placeholder = node.placeholder;
    search.addEventListener('input', () => fill(search.value));
    wrap.appendChild(search);
  }
  state.site = node.value;
  fill('');
  select.addEventListener('change', () => {
    state.site = select.value;
    fire(node.id);
  });
  wrap.appendChild(select);
  return wrap;
}

function renderSlider(node) {
  const wrap = document.createElement('div');
  wrap.className = 'range';
  wrap.id = node.id;
  const span = node.max - node.min;
  const lo = document.createElement('input');
  const hi = document.createElement('input');
  for (const [input, v] of [[lo, node.value[0]], [hi, node.value[1]]]) {
    input.type = 'range';
    input.min = node.min;
    input.max = node.max;
    input.step = node.step;
    input.value = v;
    wrap.appendChild(input);
  }
  const marks = document.createElement('div');
  marks.className = 'marks';
  marks.innerHTML = node.marks
    .map(m => `<span style="left:${((m.value - node.min) / span) * 100}%">${esc(m.label)}</span>`)
    .join('');
  wrap.appendChild(marks);
  const readout = document.createElement('div');
  readout.className = 'value';
  wrap.appendChild(readout);

  // The seeded value may fall off the step grid; keep it until the user moves a thumb.
  state.payload = [node.value[0], node.value[1]];
  readout.textContent = `${state.payload[0]} to ${state.payload[1]} kg`;

  const onInput = (moved) => {
    let a = Number(lo.value), b = Number(hi.value);
    if (a > b) {
      if (moved === lo) { a = b; lo.value = a; } else { b = a; hi.value = b; }
    }
    state.payload = [a, b];
    readout.textContent = `${a} to ${b} kg`;
  };
  lo.addEventListener('input', () => onInput(lo));
  hi.addEventListener('input', () => onInput(hi));
  lo.addEventListener('change', () => fire(node.id));
  hi.addEventListener('change', () => fire(node.id));
  return wrap;
}

// ---------------------------------------------------------------------------
// Chart drawing
// ---------------------------------------------------------------------------
const THEME = {
  paper_bgcolor: 'rgba(0,0,0,0)',
  plot_bgcolor: 'rgba(0,0,0,0)',
  font: { color: '#e6edf3' },
  margin: { t: 48, r: 16, b: 48, l: 56 },
};

function drawFigure(pub) {
  const card = document.getElementById(pub.output);
  if (!card) return;
  let note = card.querySelector('.warning');
  let plot = card.querySelector('.plot');
  if (!plot) {
    note = document.createElement('div');
    note.className = 'warning';
    plot = document.createElement('div');
    plot.className = 'plot';
    card.append(note, plot);
  }
  note.textContent = pub.warning ? pub.warning.message : '';
  const layout = Object.assign({}, pub.figure.layout, THEME);
  Plotly.react(plot, pub.figure.data, layout, { responsive: true, displaylogo: false });
}

// ---------------------------------------------------------------------------
// Boot
// ---------------------------------------------------------------------------
(async function boot() {
  const layout = await api('GET', '/api/layout');
  document.getElementById('app').appendChild(render(layout.root));
  await fire(null);
})();
</script>
</body>
</html>
"##;
