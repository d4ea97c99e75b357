use chrono::NaiveDate;
use shift_timeline::{
    RenderModel, ResourceGrid, TimelineConfig, ZoomLevel, load_resources_from_csv,
    load_resources_from_json, logging, save_render_model_to_json,
};
use std::io::{self, Write};
use std::str::FromStr;

fn render_model_as_text_table(model: &RenderModel) -> String {
    let mut header: Vec<String> = vec!["resource".to_string()];
    header.extend(model.axis_cells.iter().map(|cell| cell.label.clone()));

    let rows: Vec<Vec<String>> = model
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.resource_name.clone()];
            for axis_cell in &model.axis_cells {
                let text = row
                    .bars
                    .iter()
                    .filter(|bar| bar.column == axis_cell.index)
                    .map(|bar| bar.label.clone())
                    .collect::<Vec<_>>()
                    .join(",");
                cells.push(text);
            }
            cells
        })
        .collect();

    // Compute column widths
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (ci, text) in row.iter().enumerate() {
            if text.len() > widths[ci] {
                widths[ci] = text.len();
            }
        }
    }

    // Build horizontal separator
    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_table_line(&mut out, &header, &widths);
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        push_table_line(&mut out, row, &widths);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn push_table_line(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('|');
    for (ci, text) in cells.iter().enumerate() {
        out.push(' ');
        out.push_str(text);
        let pad = widths[ci].saturating_sub(text.len());
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
}

fn print_bars(model: &RenderModel) {
    for row in &model.rows {
        if row.bars.is_empty() {
            println!("{}: no shifts", row.resource_name);
            continue;
        }
        for bar in &row.bars {
            println!(
                "{} [{} col {}] {} left={:.2}% width={:.2}%",
                row.resource_name, bar.date, bar.column, bar.label, bar.left_pct, bar.width_pct
            );
            for brk in &bar.breaks {
                println!(
                    "    break {} left={:.2}% width={:.2}%",
                    brk.label, brk.left_pct, brk.width_pct
                );
            }
        }
    }
}

fn print_view(grid: &ResourceGrid) {
    let model = grid.render();
    println!("View: {}", model.view);
    println!("{}", render_model_as_text_table(&model));
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show the current view\n  bars                               List bar and break geometry\n  state                              Print granularity and anchor\n  next | prev                        Move one period forward/back\n  zoom <hours|days|weeks>            Switch zoom level (anchor resets to today)\n  goto <YYYY-MM-DD>                  Move the anchor, keeping the zoom level\n  drill <index>                      Activate the header cell at index\n  load <json|csv> <path>             Load a resource snapshot\n  export <path>                      Write the render model as JSON\n  quit|exit                          Exit"
    );
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn main() {
    if let Err(err) = logging::init_from_env() {
        eprintln!("{err}");
    }

    let config = match std::env::var("SHIFT_TIMELINE_CONFIG") {
        Ok(path) => match TimelineConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Could not read config {path}: {e}; using defaults");
                TimelineConfig::default()
            }
        },
        Err(_) => TimelineConfig::default(),
    };
    let mut grid = ResourceGrid::new(today(), config);

    println!("Shift Timeline (CLI) - type 'help' for commands\n");
    print_view(&grid);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => print_view(&grid),
            "bars" => print_bars(&grid.render()),
            "state" => println!("View: {}", grid.view()),
            "next" => {
                grid.advance();
                print_view(&grid);
            }
            "prev" => {
                grid.retreat();
                print_view(&grid);
            }
            "zoom" => match parts.next().map(ZoomLevel::from_str) {
                Some(Ok(zoom)) => {
                    grid.select_granularity(zoom, today());
                    print_view(&grid);
                }
                Some(Err(e)) => println!("{e}"),
                None => println!("Usage: zoom <hours|days|weeks>"),
            },
            "goto" => match parts.next() {
                Some(date_s) => match NaiveDate::parse_from_str(date_s, "%Y-%m-%d") {
                    Ok(date) => {
                        grid.jump_to(date);
                        print_view(&grid);
                    }
                    Err(_) => println!("Invalid date (YYYY-MM-DD)"),
                },
                None => println!("Usage: goto <YYYY-MM-DD>"),
            },
            "drill" => match parts.next().map(str::parse::<usize>) {
                Some(Ok(index)) => {
                    if grid.activate_cell(index) {
                        println!("Drilled into cell {index}.");
                        print_view(&grid);
                    } else {
                        println!("Cell {index} cannot be drilled into.");
                    }
                }
                Some(Err(_)) => println!("Invalid index"),
                None => println!("Usage: drill <index>"),
            },
            "load" => {
                let fmt = parts.next();
                let path = parts.next();
                match (fmt, path) {
                    (Some(fmt), Some(path)) => {
                        let result = match fmt {
                            "json" => load_resources_from_json(path, grid.config()),
                            "csv" => load_resources_from_csv(path, grid.config()),
                            _ => {
                                println!("Unknown format '{fmt}' (expected json or csv)");
                                continue;
                            }
                        };
                        match result {
                            Ok(resources) => {
                                let count = resources.len();
                                grid.replace_resources(resources);
                                println!("Loaded {count} resources from {path}.");
                                print_view(&grid);
                            }
                            Err(e) => println!("Load error: {e}"),
                        }
                    }
                    _ => println!("Usage: load <json|csv> <path>"),
                }
            }
            "export" => match parts.next() {
                Some(path) => match save_render_model_to_json(&grid.render(), path) {
                    Ok(()) => println!("Render model written to {path}."),
                    Err(e) => println!("Export error: {e}"),
                },
                None => println!("Usage: export <path>"),
            },
            _ => println!("Unknown command '{cmd}'. Type 'help'."),
        }
    }
}
