mod data;

use std::fs::File;
use std::io::{self, Stdout, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::Print;
use crossterm::{cursor, execute, queue, terminal};
use simplelog::{Config, LevelFilter, WriteLogger};
use tablekit::{
    BodyState, Focus, Key, LayoutDirection, Modifiers, Scale, SelectionMode, Table, TableConfig,
    TableEvent,
};

use data::Entry;

/// Virtual pixel size handed to the engine.
const VIEWPORT: (f64, f64) = (1000.0, 600.0);

#[derive(Debug, Default)]
struct Options {
    rtl: bool,
    large: bool,
    dump: bool,
}

impl Options {
    fn from_args() -> Self {
        let mut options = Self::default();
        for arg in std::env::args().skip(1) {
            match arg.as_str() {
                "--rtl" => options.rtl = true,
                "--large" => options.large = true,
                "--dump" => options.dump = true,
                other => eprintln!("ignoring unknown argument: {other}"),
            }
        }
        options
    }

    fn config(&self) -> TableConfig {
        let config = TableConfig::default()
            .with_selection_mode(SelectionMode::Multiple)
            .with_empty_state();
        let config = if self.rtl {
            config.with_direction(LayoutDirection::Rtl)
        } else {
            config
        };
        if self.large {
            config.with_scale(Scale::Large)
        } else {
            config
        }
    }
}

/// Raw-mode alternate screen, restored on drop.
struct Screen {
    stdout: Stdout,
}

impl Screen {
    fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { stdout })
    }

    fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        for (y, line) in lines.iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, y as u16), Print(line))?;
        }
        self.stdout.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn main() {
    if let Err(e) = run(Options::from_args()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(options: Options) -> io::Result<()> {
    let log_file = File::create("tablekit-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file).map_err(io::Error::other)?;

    let rows = data::page(0, data::PAGE_SIZE);
    let mut table =
        Table::with_rows(data::columns(), options.config(), rows).map_err(io::Error::other)?;
    table.set_viewport(VIEWPORT.0, VIEWPORT.1);

    if options.dump {
        let columns = serde_json::to_string_pretty(table.column_layout()).map_err(io::Error::other)?;
        let rows = serde_json::to_string_pretty(table.row_layout()).map_err(io::Error::other)?;
        println!("{columns}\n{rows}");
        return Ok(());
    }

    let mut screen = Screen::new()?;
    let mut recent: Vec<String> = Vec::new();
    table.focus_row(0);

    loop {
        for event in table.drain_events() {
            handle_table_event(&mut table, &event);
            recent.push(serde_json::to_string(&event).map_err(io::Error::other)?);
        }
        if recent.len() > 8 {
            recent.drain(..recent.len() - 8);
        }
        screen.draw(&status(&table, &recent))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => return Ok(()),
            KeyCode::Tab if table.focus() == Focus::Idle => {
                table.focus_row(0);
            }
            KeyCode::Tab => {
                table.blur();
            }
            KeyCode::PageDown => {
                let offset = table.scroll_offset() + table.body_viewport_height();
                table.scroll_to(offset);
            }
            KeyCode::PageUp => {
                let offset = table.scroll_offset() - table.body_viewport_height();
                table.scroll_to(offset);
            }
            code => {
                let modifiers: Modifiers = key.modifiers.into();
                let key: Key = code.into();
                table.handle_key(key, modifiers);
            }
        }
    }
}

/// Play the data source: page in rows and apply sorts.
fn handle_table_event(table: &mut Table<Entry>, event: &TableEvent) {
    match event {
        TableEvent::LoadMore if table.len() < data::MAX_ROWS => {
            table.set_loading(BodyState::LoadingMore);
            let mut rows = table.rows().to_vec();
            rows.extend(data::page(rows.len(), data::PAGE_SIZE));
            if let Some(sort) = table.sort().cloned() {
                data::sort(&mut rows, &sort);
            }
            if let Err(e) = table.set_rows(rows) {
                log::warn!("[demo] {}", e);
            }
            table.set_loading(BodyState::Idle);
        }
        TableEvent::SortChange(sort) => {
            let mut rows = table.rows().to_vec();
            data::sort(&mut rows, sort);
            if let Err(e) = table.set_sort_descriptor(Some(sort.clone())) {
                log::warn!("[demo] {}", e);
                return;
            }
            if let Err(e) = table.set_rows(rows) {
                log::warn!("[demo] {}", e);
            }
        }
        _ => {}
    }
}

fn status(table: &Table<Entry>, recent: &[String]) -> Vec<String> {
    let visible = table.visible_rows();
    let mut lines = vec![
        "tablekit demo: arrows move, space selects, ctrl+a all, esc clears, tab toggles focus, q quits"
            .to_string(),
        String::new(),
        format!("rows:      {} ({:?})", table.len(), table.body_state()),
        format!("focus:     {:?}", table.focus()),
        format!("selected:  {} ({:?})", table.selected_keys().len(), table.tristate()),
        format!("sort:      {:?}", table.sort()),
        format!(
            "scroll:    {:.0} / {:.0}, rows {}..{}",
            table.scroll_offset(),
            table.row_layout().body_height(),
            visible.start,
            visible.end
        ),
        String::new(),
    ];

    let visible_keys: Vec<String> = visible
        .filter_map(|i| table.row(i))
        .take(10)
        .map(|r| {
            let mark = if table.is_selected(&r.name) { "[x]" } else { "[ ]" };
            format!("  {mark} {:<10} {:<9} {:>6}", r.name, r.kind, r.size)
        })
        .collect();
    lines.extend(visible_keys);
    lines.push(String::new());
    lines.push("events:".to_string());
    lines.extend(recent.iter().map(|e| format!("  {e}")));
    lines
}
