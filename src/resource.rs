// riwayat/src/resource.rs
use convert_case::{Case, Casing};
use serde::Serialize;
use serde_json::Value;

use crate::configs::initializer::RiwayatConfig;
use crate::filters::{apply_field_filters, apply_text_search, parse_query_for, FilterField, ListQuery};
use crate::menu::{MenuAction, MenuItem, RowAction};
use crate::pagination::{page_slice, page_window, total_pages, PageWindow};
use crate::sort::{sort_items, SortDirection, SortField};
use crate::utils::compare::RankTable;
use crate::utils::rbac::{filter_gated, PermissionSet, Requirement, DEFAULT_PERMISSION_FIELD};

/// Page size and paging-control width applied when a query does not say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub page_size: u32,
    pub max_visible_pages: u32,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page_size: 10,
            max_visible_pages: 5,
        }
    }
}

impl From<&RiwayatConfig> for ListOptions {
    fn from(config: &RiwayatConfig) -> Self {
        Self {
            page_size: config.page_size,
            max_visible_pages: config.max_visible_pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub key: String,
    pub label: String,
    pub sortable: bool,
}

/// One list page of the portal: which fields search, filter and sort, and
/// which row actions it offers.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceConfig {
    name: String,
    singular: String,
    base_path: String,
    menu_group: Option<String>,
    icon: Option<String>,
    order: Option<usize>,
    columns: Vec<String>,
    searchable: Vec<String>,
    filters: Vec<FilterField>,
    sortable: Vec<SortField>,
    default_sort: Option<(String, SortDirection)>,
    actions: Vec<MenuAction>,
    permission_field: String,
}

impl ResourceConfig {
    pub fn new(name: &str, singular: &str) -> Self {
        Self {
            name: name.to_string(),
            singular: singular.to_string(),
            base_path: format!("/{}", name),
            menu_group: None,
            icon: None,
            order: None,
            columns: Vec::new(),
            searchable: Vec::new(),
            filters: Vec::new(),
            sortable: Vec::new(),
            default_sort: None,
            actions: vec![MenuAction::View],
            permission_field: DEFAULT_PERMISSION_FIELD.to_string(),
        }
    }

    pub fn base_path(mut self, path: &str) -> Self {
        self.base_path = path.to_string();
        self
    }

    pub fn menu(mut self, group: Option<&str>, icon: &str, order: usize) -> Self {
        self.menu_group = group.map(str::to_string);
        self.icon = Some(icon.to_string());
        self.order = Some(order);
        self
    }

    pub fn columns(mut self, keys: &[&str]) -> Self {
        self.columns = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn searchable(mut self, keys: &[&str]) -> Self {
        self.searchable = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn filter(mut self, field: FilterField) -> Self {
        self.filters.push(field);
        self
    }

    pub fn sortable(mut self, key: &str) -> Self {
        self.sortable.push(SortField::new(key));
        self
    }

    /// Sortable column holding amounts, compared numerically even when the
    /// records store them as strings.
    pub fn numeric(mut self, key: &str) -> Self {
        self.sortable.push(SortField::numeric(key));
        self
    }

    pub fn ranked(mut self, key: &str, rank: RankTable) -> Self {
        self.sortable.push(SortField::ranked(key, rank));
        self
    }

    pub fn default_sort(mut self, key: &str, direction: SortDirection) -> Self {
        self.default_sort = Some((key.to_string(), direction));
        self
    }

    pub fn actions(mut self, actions: &[MenuAction]) -> Self {
        self.actions = actions.to_vec();
        self
    }

    pub fn permission_field(mut self, field: &str) -> Self {
        self.permission_field = field.to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> String {
        self.name.to_case(Case::Title)
    }

    pub fn menu_group(&self) -> Option<&str> {
        self.menu_group.as_deref()
    }

    pub fn searchable_fields(&self) -> &[String] {
        &self.searchable
    }

    pub fn filter_fields(&self) -> &[FilterField] {
        &self.filters
    }

    pub fn sort_fields(&self) -> &[SortField] {
        &self.sortable
    }

    pub fn record_permission_field(&self) -> &str {
        &self.permission_field
    }

    pub fn list_requirement(&self) -> Requirement {
        Requirement::single(MenuAction::List.permission_name(&self.singular, &self.name))
    }

    pub fn menu_item(&self) -> MenuItem {
        MenuItem {
            title: self.title(),
            path: MenuAction::List.to_path(&self.base_path),
            children: None,
            icon: self.icon.clone(),
            order: self.order,
            permission: Some(self.list_requirement()),
        }
    }

    pub fn column_headers(&self) -> Vec<Column> {
        self.columns
            .iter()
            .map(|key| Column {
                key: key.clone(),
                label: key.replace('.', "_").to_case(Case::Title),
                sortable: self.sortable.iter().any(|s| &s.key == key),
            })
            .collect()
    }

    pub fn row_actions(&self) -> Vec<RowAction> {
        self.actions
            .iter()
            .map(|action| RowAction {
                action: *action,
                label: action.label().to_string(),
                path: action.to_path(&self.base_path),
                permission: Requirement::single(action.permission_name(&self.singular, &self.name)),
            })
            .collect()
    }

    pub fn visible_actions(&self, permissions: &PermissionSet) -> Vec<RowAction> {
        filter_gated(&self.row_actions(), permissions)
    }

    /// Read a list page URL query against this page's filter controls.
    pub fn parse_query(&self, query: &str) -> ListQuery {
        parse_query_for(query, &self.filters)
    }

    /// Run the full pipeline: search, filter, sort, then cut out the
    /// requested page.
    pub fn view(&self, items: &[Value], query: &ListQuery, options: ListOptions) -> ListView {
        let searched = apply_text_search(items, &query.search, &self.searchable);
        let filtered = apply_field_filters(&searched, &query.filters, &self.filters);

        let (sort_key, direction) = match (&query.sort_key, &self.default_sort) {
            (Some(key), _) => (Some(key.as_str()), query.sort_direction),
            (None, Some((key, direction))) => (Some(key.as_str()), *direction),
            (None, None) => (None, query.sort_direction),
        };
        let sorted = sort_items(&filtered, sort_key, direction, &self.sortable);

        let page_size = query.per_page.unwrap_or(options.page_size).max(1);
        let total = total_pages(sorted.len(), page_size);
        let window = page_window(total, query.page.unwrap_or(1), options.max_visible_pages);
        let rows = page_slice(&sorted, window.current_page, page_size);

        let range_start = if rows.is_empty() {
            0
        } else {
            (window.current_page as usize - 1) * page_size as usize + 1
        };
        let range_end = if rows.is_empty() { 0 } else { range_start + rows.len() - 1 };

        tracing::debug!(
            "{}: {} records, {} after search, {} after filters, page {}/{}",
            self.name,
            items.len(),
            searched.len(),
            sorted.len(),
            window.current_page,
            window.total_pages
        );

        ListView {
            resource: self.name.clone(),
            rows,
            total_items: sorted.len(),
            range_start,
            range_end,
            window,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView {
    pub resource: String,
    pub rows: Vec<Value>,
    pub total_items: usize,
    pub range_start: usize,
    pub range_end: usize,
    pub window: PageWindow,
}

impl ListView {
    pub fn summary(&self) -> String {
        format!("Showing {}-{} of {}", self.range_start, self.range_end, self.total_items)
    }
}
