use crate::dataset::Dataset;

pub const HEADING: &str = "Sleep as a pillar of brain health";

const PARAGRAPHS: [&str; 4] = [
    "Background: Sleep is a complex process affecting the whole body and is an essential part of physical and mental health and wellbeing. \
     Sleep, alongside diet and physical activity, has been described as one of the three pillars of health and a \"fundamental building block\" \
     for achieving and maintaining good health.",
    "Problem: When quality, quantity and consistency of sleep are insufficient or compromised, an individual's sleep health will be poor or \
     suboptimal, being more likely to experience negative health and wellbeing consequences associated with poor sleep.",
    "Goal: To improve population sleep health, to reduce preventable risk factors by examining the relationship between the subjective quality \
     of sleep and different modifiable factors.",
    "This dynamic visualization provides information about perceived quality of sleep related to 2 factors: occupation and quantity of sleep.",
];

const PROMPT: &str =
    "Select a Quality of Sleep from the dropdown box to display the plot of Occupation vs. Sleep Duration.";

pub fn render_index(dataset: &Dataset) -> String {
    let paragraphs: String = PARAGRAPHS
        .iter()
        .map(|text| format!("      <p>{}</p>\n", escape_html(text)))
        .collect();

    INDEX_HTML
        .replace("{{HEADING}}", &escape_html(HEADING))
        .replace("{{PARAGRAPHS}}", paragraphs.trim_end())
        .replace("{{PROMPT}}", &escape_html(PROMPT))
        .replace("{{DROPDOWN}}", &render_dropdown(dataset))
}

fn render_dropdown(dataset: &Dataset) -> String {
    let options = dataset.quality_options();
    let Some(default) = options.first().copied() else {
        return r#"<select id="quality-sleep-dropdown" disabled></select>"#.to_string();
    };

    let items: String = options
        .iter()
        .map(|value| {
            let selected = if *value == default { " selected" } else { "" };
            format!(r#"<option value="{value}"{selected}>{value}</option>"#)
        })
        .collect();
    format!(r#"<select id="quality-sleep-dropdown">{items}</select>"#)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{HEADING}}</title>
  <style>
    :root {
      --bg: #f4f6f9;
      --ink: #2b2a28;
      --accent: #636efa;
      --muted: #6b645d;
      --card: #ffffff;
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Open Sans", "Trebuchet MS", sans-serif;
    }

    .app {
      max-width: 800px;
      margin: auto;
      padding: 20px;
    }

    h2 {
      text-align: center;
    }

    .prompt {
      text-align: center;
      font-weight: bold;
    }

    .dropdown {
      width: 30%;
      margin: auto;
    }

    select {
      width: 100%;
      padding: 8px 10px;
      border-radius: 6px;
      border: 1px solid #ccc;
      font-size: 1rem;
    }

    .chart-card {
      margin-top: 24px;
      background: var(--card);
      border-radius: 12px;
      padding: 16px;
      box-shadow: var(--shadow);
    }

    .chart-card h3 {
      margin: 0 0 8px;
      font-size: 1.1rem;
    }

    #occupation-sleep-duration-plot {
      width: 100%;
      height: 420px;
      display: block;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-point {
      fill: var(--accent);
      stroke: white;
      stroke-width: 1;
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .chart-axis-title {
      fill: var(--ink);
      font-size: 12px;
    }

    .status {
      font-size: 0.95rem;
      color: var(--muted);
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }
  </style>
</head>
<body>
  <main class="app">
    <h2>{{HEADING}}</h2>
{{PARAGRAPHS}}

    <p class="prompt">{{PROMPT}}</p>
    <div class="dropdown">{{DROPDOWN}}</div>

    <section class="chart-card">
      <h3 id="plot-title"></h3>
      <svg id="occupation-sleep-duration-plot" viewBox="0 0 760 420" role="img" aria-label="Occupation vs. Sleep Duration"></svg>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const dropdown = document.getElementById('quality-sleep-dropdown');
    const chartEl = document.getElementById('occupation-sleep-duration-plot');
    const titleEl = document.getElementById('plot-title');
    const statusEl = document.getElementById('status');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const escapeText = (value) =>
      String(value).replace(/[&<>"']/g, (ch) => ({
        '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;'
      })[ch]);

    const formatAxisValue = (value) => {
      const rounded = Math.round(value * 10) / 10;
      return Number.isInteger(rounded) ? rounded.toString() : rounded.toFixed(1);
    };

    const renderScatter = (spec) => {
      titleEl.textContent = spec.title;
      if (spec.empty) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data for this selection</text>';
        return;
      }

      const width = 760;
      const height = 420;
      const left = 60;
      const right = 20;
      const top = 20;
      const bottom = 90;

      const categories = spec.x_axis.categories;
      const values = spec.points.map((point) => point.y);
      let min = Math.floor(Math.min(...values) - 0.5);
      let max = Math.ceil(Math.max(...values) + 0.5);
      if (min === max) {
        max += 1;
      }

      const band = (width - left - right) / categories.length;
      const x = (category) => left + band * (categories.indexOf(category) + 0.5);
      const y = (value) => height - bottom - ((value - min) / (max - min)) * (height - top - bottom);

      const ticks = 5;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + ((max - min) * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${left}" y1="${yPos}" x2="${width - right}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${left - 8}" y="${yPos + 4}" text-anchor="end">${formatAxisValue(value)}</text>`;
      }

      const xLabels = categories
        .map((category) => {
          const xPos = x(category);
          const yPos = height - bottom + 14;
          return `<text class="chart-label" x="${xPos}" y="${yPos}" text-anchor="end" transform="rotate(-35 ${xPos} ${yPos})">${escapeText(category)}</text>`;
        })
        .join('');

      const r = spec.marker_size / 2;
      const circles = spec.points
        .map((point) => {
          const tip = `Occupation=${point.hover.occupation}\nSleep Duration=${point.hover.sleep_duration}\nCount=${point.hover.count}`;
          return `<circle class="chart-point" cx="${x(point.x)}" cy="${y(point.y)}" r="${r}"><title>${escapeText(tip)}</title></circle>`;
        })
        .join('');

      const axisTitles = `
        <text class="chart-axis-title" x="${(left + width - right) / 2}" y="${height - 8}" text-anchor="middle">${escapeText(spec.x_axis.title)}</text>
        <text class="chart-axis-title" x="14" y="${(top + height - bottom) / 2}" text-anchor="middle" transform="rotate(-90 14 ${(top + height - bottom) / 2})">${escapeText(spec.y_axis.title)}</text>`;

      chartEl.setAttribute('viewBox', `0 0 ${width} ${height}`);
      chartEl.innerHTML = `${grid}${xLabels}${circles}${axisTitles}`;
    };

    const loadPlot = async () => {
      const query = dropdown.value ? `?quality=${encodeURIComponent(dropdown.value)}` : '';
      const res = await fetch(`/api/plot${query}`);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Unable to load plot');
      }
      renderScatter(await res.json());
      setStatus('', '');
    };

    dropdown.addEventListener('change', () => {
      loadPlot().catch((err) => setStatus(err.message, 'error'));
    });

    loadPlot().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RawRecord;

    #[test]
    fn dropdown_lists_sorted_options_with_default_selected() {
        let dataset = Dataset::from_raw(vec![
            RawRecord::new("Nurse", 8, 6.5),
            RawRecord::new("Doctor", 6, 7.0),
            RawRecord::new("Engineer", 8, 7.9),
        ]);
        let html = render_index(&dataset);
        assert!(html.contains(
            r#"<select id="quality-sleep-dropdown"><option value="6" selected>6</option><option value="8">8</option></select>"#
        ));
        assert!(html.contains("<h2>Sleep as a pillar of brain health</h2>"));
        assert!(html.contains("occupation-sleep-duration-plot"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn empty_dataset_renders_disabled_dropdown() {
        let html = render_index(&Dataset::default());
        assert!(html.contains(r#"<select id="quality-sleep-dropdown" disabled></select>"#));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }
}
