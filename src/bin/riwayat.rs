// riwayat/src/bin/riwayat.rs

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use riwayat::{
    advance_page, compute_page_window, filter_by_permission, find_resource, get_riwayat_config,
    has_permission, menus_for, registry::all_resources, setup_riwayat_logging,
    helpers::{downloads::csv_download::export_view_as_csv, fixture_helper::load_fixture},
    menu::MenuItem,
    utils::structs::ApiResponse,
    ListOptions, PageDirection, PageToken, PermissionSet, Requirement,
};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "riwayat")]
#[command(about = "Riwayat admin tool for previewing gated, filtered resource lists")]
#[command(version)]
struct Cli {
    /// Permissions of the acting admin (comma separated)
    #[arg(long, env = "RIWAYAT_PERMISSIONS", value_delimiter = ',', global = true)]
    permissions: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered resources
    Resources,
    /// Run a list page over a JSON fixture
    List {
        /// Resource name (kitchens, dishes, orders, customers, applications)
        resource: String,
        /// JSON file holding an array of records
        #[arg(short, long)]
        data: String,
        /// Query string, e.g. "search=ali&status=active&sort=-name&page=2"
        #[arg(short, long, default_value = "")]
        query: String,
        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
    /// Evaluate a permission requirement
    Check {
        /// Required permission; repeat for several
        #[arg(short, long, required = true)]
        require: Vec<String>,
        /// Require every permission instead of any one
        #[arg(long)]
        all: bool,
    },
    /// Show the paging control for a list size
    Pages {
        /// Number of records after filtering
        #[arg(long)]
        items: usize,
        /// Current page
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Records per page (defaults to RIWAYAT_PAGE_SIZE)
        #[arg(long)]
        page_size: Option<u32>,
        /// Page buttons before collapsing (defaults to RIWAYAT_MAX_VISIBLE_PAGES)
        #[arg(long)]
        max_visible: Option<u32>,
        /// Step "previous" or "next" from the current page first
        #[arg(long)]
        step: Option<PageDirection>,
    },
    /// Show the sidebar for the acting admin
    Menus,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = get_riwayat_config();
    setup_riwayat_logging(&config);

    let permissions: PermissionSet = cli
        .permissions
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    let options = ListOptions::from(&config);

    match cli.command {
        Commands::Resources => {
            for resource in all_resources() {
                let allowed = has_permission(&permissions, Some(&resource.list_requirement()));
                let filters: Vec<&str> = resource.filter_fields().iter().map(|f| f.key.as_str()).collect();
                let sorts: Vec<&str> = resource.sort_fields().iter().map(|f| f.key.as_str()).collect();
                println!(
                    "{:<14} {:<10} {:<8} search: {} | filters: {} | sort: {}",
                    resource.name(),
                    resource.menu_group().unwrap_or("-"),
                    if allowed { "visible" } else { "hidden" },
                    resource.searchable_fields().join(", "),
                    filters.join(", "),
                    sorts.join(", ")
                );
            }
        }
        Commands::List { resource, data, query, format } => {
            list_resource(&resource, &data, &query, &format, &permissions, options)?;
        }
        Commands::Check { require, all } => {
            let requirement = match (require.len(), all) {
                (1, _) => Requirement::single(require[0].clone()),
                (_, true) => Requirement::all(require),
                (_, false) => Requirement::any(require),
            };
            let allowed = has_permission(&permissions, Some(&requirement));
            println!("{}", if allowed { "allowed" } else { "denied" });
            if !allowed {
                std::process::exit(2);
            }
        }
        Commands::Pages { items, page, page_size, max_visible, step } => {
            let page_size = page_size.unwrap_or(options.page_size);
            let max_visible = max_visible.unwrap_or(options.max_visible_pages);
            let mut window = compute_page_window(items, page, page_size, max_visible);
            if let Some(direction) = step {
                let next = advance_page(direction, window.current_page, window.total_pages);
                window = compute_page_window(items, next, page_size, max_visible);
            }
            println!("page {} of {}", window.current_page, window.total_pages);
            println!("{}", render_tokens(&window.pages, window.current_page));
        }
        Commands::Menus => {
            print_menus(&menus_for(&permissions), 0);
        }
    }

    Ok(())
}

fn list_resource(
    name: &str,
    data: &str,
    query: &str,
    format: &str,
    permissions: &PermissionSet,
    options: ListOptions,
) -> Result<()> {
    let resource = find_resource(name)?;
    if !has_permission(permissions, Some(&resource.list_requirement())) {
        let denied: ApiResponse<()> = ApiResponse::error(format!("Access denied to {}", resource.name()));
        println!("{}", serde_json::to_string_pretty(&denied)?);
        std::process::exit(2);
    }

    let records = load_fixture(data).with_context(|| format!("loading {}", data))?;
    let records = filter_by_permission(&Value::Array(records), permissions, resource.record_permission_field());
    let list_query = resource.parse_query(query);
    let view = resource.view(&records, &list_query, options);
    let actions = resource.visible_actions(permissions);

    match format {
        "json" => {
            let body = ApiResponse::success(json!({
                "view": view,
                "columns": resource.column_headers(),
                "actions": actions,
                "query": list_query.to_query_string(),
            }));
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        "csv" => print!("{}", export_view_as_csv(resource, &view)),
        "table" => {
            let headers = resource.column_headers();
            println!(
                "{}",
                headers.iter().map(|c| format!("{:<18}", c.label)).collect::<String>()
            );
            for row in &view.rows {
                let line: String = headers
                    .iter()
                    .map(|c| {
                        let cell = riwayat::utils::fields::text_at(row, &c.key).unwrap_or_default();
                        format!("{:<18}", cell.chars().take(17).collect::<String>())
                    })
                    .collect();
                println!("{}", line);
            }
            println!();
            println!("{}", view.summary());
            println!("{}", render_tokens(&view.window.pages, view.window.current_page));
            let labels: Vec<&str> = actions.iter().map(|a| a.label.as_str()).collect();
            println!("actions: {}", if labels.is_empty() { "-".to_string() } else { labels.join(", ") });
        }
        other => bail!("unknown format '{}' (expected table, json or csv)", other),
    }

    Ok(())
}

fn render_tokens(pages: &[PageToken], current: u32) -> String {
    pages
        .iter()
        .map(|token| match token {
            PageToken::Page(n) if *n == current => format!("[{}]", n),
            PageToken::Page(n) => n.to_string(),
            PageToken::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_menus(menus: &[MenuItem], depth: usize) {
    for item in menus {
        println!("{}{} {}", "  ".repeat(depth), item.title, item.path);
        if let Some(children) = &item.children {
            print_menus(children, depth + 1);
        }
    }
}
