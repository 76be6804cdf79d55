use crate::date_key::DateKey;
use crate::models::{CalendarResponse, HabitSummary, MAX_NAME_LEN};
use crate::status::DayStatus;

pub fn render_index(today: DateKey, habits: &[HabitSummary], calendar: &CalendarResponse) -> String {
    INDEX_HTML
        .replace("{{TODAY}}", &today.to_string())
        .replace("{{MAX_NAME_LEN}}", &MAX_NAME_LEN.to_string())
        .replace("{{QUICK_MARK}}", &render_quick_mark(habits, &calendar.month))
        .replace("{{CALENDAR}}", &render_calendar(calendar))
}

/// Quick-mark forms carry no date, so the toggle lands on the day of the click.
fn render_quick_mark(habits: &[HabitSummary], month: &str) -> String {
    if habits.is_empty() {
        return String::new();
    }

    let mut html = String::from(r#"<section class="card"><h2>Quick Mark Today</h2><div class="quick">"#);
    for habit in habits {
        let bars: String = habit
            .week
            .days
            .iter()
            .zip(&habit.week.dates)
            .map(|(done, date)| {
                format!(
                    r#"<span class="bar{}" title="{}: {}"></span>"#,
                    if *done { " done" } else { "" },
                    date,
                    if *done { "Completed" } else { "Not completed" }
                )
            })
            .collect();

        html.push_str(&format!(
            r#"<div class="quick-row">
  <span class="name">{name}</span>
  <form class="quick-mark" method="post" action="/habits/{id}/toggle">
    <input type="hidden" name="month" value="{month}" />
    <button class="{class}" type="submit">Today: {symbol}</button>
  </form>
  <div class="week">
    <div class="week-meta"><span>Week: {completed}/{total}</span><span>{pct}%</span></div>
    <div class="bars">{bars}</div>
  </div>
</div>"#,
            name = escape(&habit.name),
            id = escape(&habit.id),
            class = if habit.today == DayStatus::Completed { "marked" } else { "" },
            symbol = habit.today.symbol(),
            completed = habit.week.completed,
            total = habit.week.total,
            pct = habit.week.percentage,
        ));
    }
    html.push_str("</div></section>");
    html
}

fn render_calendar(calendar: &CalendarResponse) -> String {
    let mut html = format!(
        r#"<section class="card"><h2>Habit Calendar</h2>
<nav class="month-nav">
  <a href="/?month={previous}">&lt;</a><h3>{label}</h3><a href="/?month={next}">&gt;</a>
</nav>"#,
        previous = calendar.previous,
        next = calendar.next,
        label = escape(&calendar.label),
    );

    if calendar.habits.is_empty() {
        html.push_str(r#"<p class="hint">No habits to track. Add your first habit above!</p></section>"#);
        return html;
    }

    html.push_str(r#"<div class="grid-wrap"><table class="grid"><thead><tr><th>Date</th>"#);
    for habit in &calendar.habits {
        html.push_str(&format!(
            r#"<th><div class="name">{name}</div><div class="streak">[*] {streak} day{plural}</div>
<form method="post" action="/habits/{id}/delete"><button class="delete" type="submit" title="Delete habit">[X]</button></form></th>"#,
            name = escape(&habit.name),
            streak = habit.streak,
            plural = if habit.streak == 1 { "" } else { "s" },
            id = escape(&habit.id),
        ));
    }
    html.push_str("</tr></thead><tbody>");

    for (index, day) in calendar.days.iter().enumerate() {
        let weekday = calendar.weekdays[index % 7];
        let mut classes = Vec::new();
        if day.is_today {
            classes.push("today");
        }
        if !day.is_current_month {
            classes.push("outside");
        }
        html.push_str(&format!(
            r#"<tr class="{}"><td class="day">{} {}</td>"#,
            classes.join(" "),
            weekday,
            day.day_of_month
        ));

        for habit in &calendar.habits {
            let status = habit.statuses[index];
            html.push_str(&format!(
                r#"<td><form method="post" action="/habits/{id}/toggle">
<input type="hidden" name="date" value="{date}" /><input type="hidden" name="month" value="{month}" />
<button class="cell {state}" type="submit"{disabled}>{symbol}</button></form></td>"#,
                id = escape(&habit.id),
                date = day.date,
                month = calendar.month,
                state = if status.is_completed() { "done" } else { "empty" },
                disabled = if day.is_current_month { "" } else { " disabled" },
                symbol = status.symbol(),
            ));
        }
        html.push_str("</tr>");
    }

    html.push_str(
        r#"</tbody></table></div>
<div class="legend"><span><b>X</b> Completed</span><span><b>.</b> Empty</span><span><b>[*]</b> Current Streak</span></div>
</section>"#,
    );
    html
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
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
  <title>Habit Tracker</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --muted: #7a746d;
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      display: grid;
      gap: 24px;
    }

    .card {
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 24px 28px;
    }

    h1, h2, h3 {
      margin: 0 0 12px;
    }

    .subtitle, .hint {
      color: var(--muted);
      margin: 0;
    }

    button {
      font: inherit;
      border: 1px solid rgba(47, 72, 88, 0.25);
      background: white;
      border-radius: 10px;
      padding: 6px 12px;
      cursor: pointer;
    }

    button.marked, .cell.done {
      background: var(--accent-2);
      color: white;
    }

    button:disabled {
      opacity: 0.4;
      cursor: default;
    }

    .quick {
      display: grid;
      gap: 12px;
    }

    .quick-row {
      display: grid;
      grid-template-columns: 1fr auto minmax(180px, 260px);
      align-items: center;
      gap: 16px;
    }

    .week-meta {
      display: flex;
      justify-content: space-between;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .bars {
      display: flex;
      gap: 4px;
    }

    .bar {
      flex: 1;
      height: 8px;
      border-radius: 4px;
      background: rgba(47, 72, 88, 0.12);
    }

    .bar.done {
      background: var(--accent);
    }

    .add-form {
      display: flex;
      gap: 12px;
    }

    .add-form input {
      flex: 1;
      font: inherit;
      padding: 8px 12px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.25);
    }

    .month-nav {
      display: flex;
      align-items: center;
      justify-content: center;
      gap: 18px;
    }

    .month-nav a {
      color: var(--accent-2);
      text-decoration: none;
      font-weight: 600;
    }

    .grid-wrap {
      overflow-x: auto;
    }

    .grid {
      border-collapse: collapse;
      width: 100%;
    }

    .grid th, .grid td {
      text-align: center;
      padding: 2px 6px;
      border-right: 1px solid rgba(47, 72, 88, 0.1);
    }

    .grid form {
      margin: 0;
    }

    .grid .cell {
      width: 28px;
      height: 28px;
      padding: 0;
    }

    .grid tr.today td.day {
      font-weight: 700;
      background: rgba(255, 107, 74, 0.2);
    }

    .grid tr.outside td.day {
      opacity: 0.5;
    }

    .streak, .delete {
      font-size: 0.75rem;
      color: var(--muted);
    }

    .legend {
      display: flex;
      justify-content: center;
      gap: 24px;
      margin-top: 16px;
      font-size: 0.9rem;
    }

    @media (max-width: 600px) {
      .quick-row {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header class="card">
      <h1>Habit Tracker</h1>
      <p class="subtitle">Today is {{TODAY}}.</p>
    </header>

    {{QUICK_MARK}}

    <section class="card">
      <h2>Add New Habit</h2>
      <form class="add-form" method="post" action="/habits">
        <input type="text" name="name" maxlength="{{MAX_NAME_LEN}}" placeholder="e.g., Morning exercise" required />
        <button type="submit">[+] Add Habit</button>
      </form>
    </section>

    {{CALENDAR}}
  </main>
</body>
</html>
"#;
