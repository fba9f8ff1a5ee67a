use chrono::NaiveDate;
use clap::ValueEnum;
use derive_setters::Setters;

use crate::domain::ERPConfig;
use crate::mock;
use crate::record::Record;
use crate::table::{ColumnDescriptor, DataTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Page {
    Dashboard,
    Hr,
    Payroll,
    Inventory,
    Ecommerce,
    RealEstate,
    Crm,
    Finance,
    Projects,
    Reports,
}

impl Page {
    pub const ALL: [Page; 10] = [
        Page::Dashboard,
        Page::Hr,
        Page::Payroll,
        Page::Inventory,
        Page::Ecommerce,
        Page::RealEstate,
        Page::Crm,
        Page::Finance,
        Page::Projects,
        Page::Reports,
    ];

    pub fn index(self) -> usize {
        Page::ALL.iter().position(|&p| p == self).unwrap_or(0)
    }

    /// Label used in the sidebar.
    pub fn nav_title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Hr => "HR Management",
            Page::Payroll => "Payroll",
            Page::Inventory => "Inventory",
            Page::Ecommerce => "Shokher Mela",
            Page::RealEstate => "SK Real Estate",
            Page::Crm => "CRM",
            Page::Finance => "Finance",
            Page::Projects => "Projects",
            Page::Reports => "Reports",
        }
    }

    /// Two letter label for the collapsed sidebar.
    pub fn short(self) -> &'static str {
        match self {
            Page::Dashboard => "DB",
            Page::Hr => "HR",
            Page::Payroll => "PY",
            Page::Inventory => "IN",
            Page::Ecommerce => "EC",
            Page::RealEstate => "RE",
            Page::Crm => "CR",
            Page::Finance => "FI",
            Page::Projects => "PJ",
            Page::Reports => "RP",
        }
    }

    /// Sub entries of a collapsible sidebar section, each opening a table tab of the page.
    pub fn children(self) -> &'static [(&'static str, usize)] {
        match self {
            Page::Ecommerce => &[("Orders", 0), ("Products", 1), ("Customers", 2)],
            Page::RealEstate => &[("Properties", 0), ("Rentals", 1), ("Offers", 2)],
            _ => &[],
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    #[default]
    SuperAdmin,
    HrManager,
    Accountant,
    InventoryManager,
    SalesManager,
}

impl Role {
    pub fn name(self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::HrManager => "HR Manager",
            Role::Accountant => "Accountant",
            Role::InventoryManager => "Inventory Manager",
            Role::SalesManager => "Sales Manager",
        }
    }

    pub fn permissions(self) -> &'static [&'static str] {
        match self {
            Role::SuperAdmin => &["all"],
            Role::HrManager => &["hr", "payroll", "reports"],
            Role::Accountant => &["finance", "payroll", "reports"],
            Role::InventoryManager => &["inventory", "ecommerce", "reports"],
            Role::SalesManager => &["crm", "ecommerce", "reports"],
        }
    }

    pub fn next(self) -> Self {
        match self {
            Role::SuperAdmin => Role::HrManager,
            Role::HrManager => Role::Accountant,
            Role::Accountant => Role::InventoryManager,
            Role::InventoryManager => Role::SalesManager,
            Role::SalesManager => Role::SuperAdmin,
        }
    }
}

// -------------------------- Display formatting ---------------------------- //

pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `$1,234` for whole amounts, `$1,234.56` otherwise. Negative amounts get a leading `-`.
pub fn currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    if cents % 100 == 0 {
        format!("{sign}${}", thousands(cents / 100))
    } else {
        format!("{sign}${}.{:02}", thousands(cents / 100), cents % 100)
    }
}

/// Always two decimals, `$179.98`.
pub fn currency_cents(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${}.{:02}", thousands(cents / 100), cents % 100)
}

fn money(record: &Record, key: &str) -> String {
    currency(record.number(key).unwrap_or(0.0))
}

// ------------------------------ Widgets data ------------------------------ //

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option)]
pub struct StatCard {
    #[setters(skip)]
    pub title: String,
    #[setters(skip)]
    pub value: String,
    /// Percent change against last month.
    pub change: Option<i32>,
}

impl StatCard {
    pub fn new(title: &str, value: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            value: value.to_string(),
            change: None,
        }
    }

    pub fn trend(&self) -> Option<Trend> {
        self.change.map(|c| if c >= 0 { Trend::Increase } else { Trend::Decrease })
    }

    pub fn change_text(&self) -> Option<String> {
        self.change.map(|c| {
            let sign = if c > 0 { "+" } else { "" };
            format!("{sign}{c}% vs last month")
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub description: String,
    pub bars: Vec<(String, u64)>,
}

impl Chart {
    fn new<'a>(
        title: &str,
        description: &str,
        bars: impl IntoIterator<Item = (&'a str, u64)>,
    ) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            bars: bars.into_iter().map(|(l, v)| (l.to_string(), v)).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tab {
    pub title: String,
    pub description: String,
    pub table: DataTable,
}

impl Tab {
    fn new(title: &str, description: &str, table: DataTable) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            table,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalForm {
    pub title: String,
    pub description: String,
    /// (label, placeholder)
    pub fields: Vec<(String, String)>,
    pub submit: String,
}

impl ModalForm {
    fn new(title: &str, description: &str, fields: &[(&str, &str)], submit: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            fields: fields
                .iter()
                .map(|(l, p)| (l.to_string(), p.to_string()))
                .collect(),
            submit: submit.to_string(),
        }
    }
}

/// Completion bar shown above the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub title: String,
    pub description: String,
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.done as f64 / self.total as f64).min(1.0)
        }
    }

    pub fn label(&self) -> String {
        format!(
            "{} of {} tasks completed ({}%)",
            self.done,
            self.total,
            (self.ratio() * 100.0).round() as u32
        )
    }
}

#[derive(Debug, Clone)]
pub struct PageContent {
    pub page: Page,
    pub title: String,
    pub subtitle: String,
    pub stats: Vec<StatCard>,
    pub progress: Option<Progress>,
    pub charts: Vec<Chart>,
    pub tabs: Vec<Tab>,
    pub modal: Option<ModalForm>,
}

impl PageContent {
    fn new(page: Page, title: &str, subtitle: &str) -> Self {
        Self {
            page,
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            stats: Vec::new(),
            progress: None,
            charts: Vec::new(),
            tabs: Vec::new(),
            modal: None,
        }
    }
}

// ------------------------------ Page builders ----------------------------- //

pub fn build(page: Page, config: &ERPConfig) -> PageContent {
    let mut content = match page {
        Page::Dashboard => dashboard(),
        Page::Hr => hr(),
        Page::Payroll => payroll(),
        Page::Inventory => inventory(),
        Page::Ecommerce => ecommerce(),
        Page::RealEstate => real_estate(),
        Page::Crm => crm(),
        Page::Finance => finance(),
        Page::Projects => projects(config.today),
        Page::Reports => reports(),
    };
    if let Some(size) = config.page_size {
        for tab in content.tabs.iter_mut() {
            tab.table.set_page_size(size);
        }
    }
    content
}

pub fn build_all(config: &ERPConfig) -> Vec<PageContent> {
    Page::ALL.iter().map(|&p| build(p, config)).collect()
}

fn order_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", "Order ID"),
        ColumnDescriptor::new("customer", "Customer").sortable(true),
        ColumnDescriptor::new("products", "Items"),
        ColumnDescriptor::new("total", "Total")
            .render(|r: &Record| currency_cents(r.number("total").unwrap_or(0.0)))
            .sortable(true),
        ColumnDescriptor::status("payment_status", "Payment"),
        ColumnDescriptor::status("status", "Status"),
        ColumnDescriptor::new("date", "Date").sortable(true),
    ]
}

const ORDER_STEPS: [&str; 4] = ["pending", "processing", "shipped", "delivered"];

/// Filled squares up to the current step of the order, e.g. `■■□□` for shipped.
fn order_stepper(status: &str) -> String {
    let reached = ORDER_STEPS
        .iter()
        .position(|&s| s == status)
        .map_or(0, |i| i + 1);
    (0..ORDER_STEPS.len())
        .map(|i| if i < reached { '■' } else { '□' })
        .collect()
}

fn tracking_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", "Order ID"),
        ColumnDescriptor::new("customer", "Customer").sortable(true),
        ColumnDescriptor::new("status", "Progress").render(|r: &Record| order_stepper(&r.text("status"))),
        ColumnDescriptor::new("total", "Total")
            .render(|r: &Record| currency_cents(r.number("total").unwrap_or(0.0)))
            .sortable(true),
        ColumnDescriptor::status("status", "Status"),
    ]
}

fn product_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("name", "Product").sortable(true),
        ColumnDescriptor::new("category", "Category"),
        ColumnDescriptor::new("sku", "SKU"),
        ColumnDescriptor::new("stock", "Stock").sortable(true),
        ColumnDescriptor::new("cost_price", "Cost")
            .render(|r: &Record| currency_cents(r.number("cost_price").unwrap_or(0.0))),
        ColumnDescriptor::new("selling_price", "Price")
            .render(|r: &Record| currency_cents(r.number("selling_price").unwrap_or(0.0)))
            .sortable(true),
        ColumnDescriptor::new("supplier", "Supplier"),
        ColumnDescriptor::new("warehouse", "Warehouse"),
        ColumnDescriptor::status("status", "Status"),
    ]
}

fn customer_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("name", "Customer").sortable(true),
        ColumnDescriptor::new("email", "Email"),
        ColumnDescriptor::new("phone", "Phone"),
        ColumnDescriptor::new("company", "Company").render(|r: &Record| {
            let company = r.text("company");
            if company.is_empty() { "-".to_string() } else { company }
        }),
        ColumnDescriptor::new("total_orders", "Orders").sortable(true),
        ColumnDescriptor::new("total_spent", "Total Spent")
            .render(|r: &Record| money(r, "total_spent"))
            .sortable(true),
        ColumnDescriptor::status("status", "Status"),
    ]
}

fn property_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("title", "Property").sortable(true),
        ColumnDescriptor::new("location", "Location"),
        ColumnDescriptor::new("type", "Type").render(|r: &Record| crate::badge::capitalize(&r.text("type"))),
        ColumnDescriptor::new("price", "Price")
            .render(|r: &Record| {
                let suffix = if r.text("type") != "land" { "/mo" } else { "" };
                format!("{}{}", money(r, "price"), suffix)
            })
            .sortable(true),
        ColumnDescriptor::new("area", "Area").render(|r: &Record| {
            format!("{} sqft", thousands(r.number("area").unwrap_or(0.0) as u64))
        }),
        ColumnDescriptor::status("status", "Status"),
        ColumnDescriptor::new("listing_date", "Listed").sortable(true),
    ]
}

fn transaction_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("date", "Date").sortable(true),
        ColumnDescriptor::new("description", "Description"),
        ColumnDescriptor::new("category", "Category"),
        ColumnDescriptor::new("type", "Type").render(|r: &Record| {
            let arrow = if r.text("type") == "income" { "↗" } else { "↘" };
            format!("{arrow} {}", crate::badge::capitalize(&r.text("type")))
        }),
        ColumnDescriptor::new("amount", "Amount")
            .render(|r: &Record| {
                let sign = if r.text("type") == "income" { "+" } else { "-" };
                format!("{sign}{}", money(r, "amount"))
            })
            .sortable(true),
        ColumnDescriptor::status("status", "Status"),
    ]
}

fn dashboard() -> PageContent {
    let mut content = PageContent::new(
        Page::Dashboard,
        "Dashboard",
        "Welcome back! Here's what's happening with your business.",
    );
    content.stats = vec![
        StatCard::new("Total Employees", "127").change(12),
        StatCard::new("Total Products", "1,245").change(8),
        StatCard::new("Total Orders", "3,842").change(-3),
        StatCard::new("Properties", "48").change(15),
        StatCard::new("Revenue", "$284,532").change(23),
        StatCard::new("Growth", "+18.2%").change(5),
    ];
    content.charts = vec![
        Chart::new(
            "Revenue Overview",
            "Monthly revenue trends",
            mock::REVENUE.iter().map(|m| (m.month, m.revenue as u64)),
        ),
        Chart::new(
            "Profit Overview",
            "Monthly profit trends",
            mock::REVENUE.iter().map(|m| (m.month, m.profit as u64)),
        ),
        Chart::new(
            "Department Distribution",
            "Employees by department",
            mock::DEPARTMENTS.iter().map(|d| (d.name, d.employee_count as u64)),
        ),
    ];

    let recent_columns = vec![
        ColumnDescriptor::new("id", "Order ID"),
        ColumnDescriptor::new("customer", "Customer"),
        ColumnDescriptor::new("total", "Total")
            .render(|r: &Record| currency_cents(r.number("total").unwrap_or(0.0))),
        ColumnDescriptor::status("status", "Status"),
        ColumnDescriptor::new("date", "Date"),
    ];
    let low_stock_columns = vec![
        ColumnDescriptor::new("name", "Product"),
        ColumnDescriptor::new("sku", "SKU"),
        ColumnDescriptor::status("status", "Status"),
        ColumnDescriptor::new("stock", "Stock")
            .render(|r: &Record| format!("{} units", r.text("stock"))),
    ];
    content.tabs = vec![
        Tab::new(
            "Recent Orders",
            "Latest e-commerce orders",
            DataTable::new(mock::records(mock::ORDERS.iter().take(5)), recent_columns).page_size(5),
        ),
        Tab::new(
            "Low Stock Alert",
            "Products that need restocking",
            DataTable::new(
                mock::records(mock::PRODUCTS.iter().filter(|p| p.status != "in-stock").take(4)),
                low_stock_columns,
            )
            .page_size(5),
        ),
    ];
    content
}

fn hr() -> PageContent {
    let mut content = PageContent::new(
        Page::Hr,
        "HR Management",
        "Manage employees, departments, and attendance",
    );
    let count = |status: &str| mock::EMPLOYEES.iter().filter(|e| e.status == status).count();
    content.stats = vec![
        StatCard::new("Total Employees", mock::EMPLOYEES.len()),
        StatCard::new("Active", count("active")).change(5),
        StatCard::new("On Leave", count("on-leave")),
        StatCard::new("Departments", mock::DEPARTMENTS.len()),
    ];
    content.charts = vec![
        Chart::new(
            "Departments",
            "Headcount per department",
            mock::DEPARTMENTS.iter().map(|d| (d.name, d.employee_count as u64)),
        ),
        Chart::new(
            "Budgets",
            "Yearly budget per department",
            mock::DEPARTMENTS.iter().map(|d| (d.name, d.budget as u64)),
        ),
    ];

    let columns = vec![
        ColumnDescriptor::new("name", "Employee").sortable(true),
        ColumnDescriptor::new("email", "Email"),
        ColumnDescriptor::new("department", "Department").sortable(true),
        ColumnDescriptor::new("role", "Role"),
        ColumnDescriptor::new("salary", "Salary")
            .render(|r: &Record| money(r, "salary"))
            .sortable(true),
        ColumnDescriptor::new("join_date", "Join Date").sortable(true),
        ColumnDescriptor::status("status", "Status"),
    ];
    content.tabs = vec![Tab::new(
        "All Employees",
        "A list of all employees in your organization",
        DataTable::new(mock::records(mock::EMPLOYEES), columns)
            .search_key("name")
            .page_size(10),
    )];
    content.modal = Some(ModalForm::new(
        "Add New Employee",
        "Fill in the details to add a new employee",
        &[
            ("Full Name", "John Doe"),
            ("Email", "john@company.com"),
            ("Department", "Select department"),
            ("Role", "Software Engineer"),
            ("Salary", "75000"),
            ("Join Date", "YYYY-MM-DD"),
        ],
        "Add Employee",
    ));
    content
}

fn payroll() -> PageContent {
    let mut content = PageContent::new(
        Page::Payroll,
        "Payroll Management",
        "Process salaries, generate payslips, and track expenses",
    );
    let rows = mock::payroll();
    let total: u64 = rows.iter().map(|r| r.net_salary as u64).sum();
    let average = if rows.is_empty() {
        0
    } else {
        (total as f64 / rows.len() as f64).round() as u64
    };
    let tax: u64 = rows.iter().map(|r| r.tax as u64).sum();
    content.stats = vec![
        StatCard::new("Total Payroll", currency(total as f64)).change(4),
        StatCard::new("Employees", rows.len()),
        StatCard::new("Avg. Salary", currency(average as f64)).change(2),
        StatCard::new("Total Tax", currency(tax as f64)),
    ];
    content.charts = vec![Chart::new(
        "Payroll Expense",
        "Monthly payroll expense trend",
        mock::PAYROLL_EXPENSE.iter().map(|&(m, v)| (m, v as u64)),
    )];

    let columns = vec![
        ColumnDescriptor::new("name", "Employee").sortable(true),
        ColumnDescriptor::new("department", "Department"),
        ColumnDescriptor::new("basic", "Basic")
            .render(|r: &Record| money(r, "basic"))
            .sortable(true),
        ColumnDescriptor::new("bonus", "Bonus").render(|r: &Record| money(r, "bonus")),
        ColumnDescriptor::new("overtime", "Overtime").render(|r: &Record| money(r, "overtime")),
        ColumnDescriptor::new("tax", "Tax").render(|r: &Record| format!("-{}", money(r, "tax"))),
        ColumnDescriptor::new("deductions", "Deductions")
            .render(|r: &Record| format!("-{}", money(r, "deductions"))),
        ColumnDescriptor::new("net_salary", "Net Salary")
            .render(|r: &Record| money(r, "net_salary"))
            .sortable(true),
    ];
    content.tabs = vec![Tab::new(
        "Payroll Details",
        "January 2024 salary breakdown",
        DataTable::new(mock::records(rows.iter()), columns)
            .search_key("name")
            .page_size(10),
    )];
    content
}

fn inventory() -> PageContent {
    let mut content = PageContent::new(
        Page::Inventory,
        "Inventory Management",
        "Track products, stock levels, and warehouse inventory",
    );
    let products = mock::PRODUCTS;
    let total_stock: u64 = products.iter().map(|p| p.stock as u64).sum();
    let count = |status: &str| products.iter().filter(|p| p.status == status).count();
    let value: f64 = products.iter().map(|p| p.stock as f64 * p.cost_price).sum();
    content.stats = vec![
        StatCard::new("Total Products", products.len()),
        StatCard::new("Total Stock", thousands(total_stock)),
        StatCard::new("Low Stock", count("low-stock")),
        StatCard::new("Out of Stock", count("out-of-stock")),
        StatCard::new("Inventory Value", currency(value)),
    ];

    let tab = |title: &str, description: &str, status: Option<&str>| {
        let items = products
            .iter()
            .filter(|p| status.is_none_or(|s| p.status == s));
        Tab::new(
            title,
            description,
            DataTable::new(mock::records(items), product_columns())
                .search_key("name")
                .page_size(10),
        )
    };
    content.tabs = vec![
        tab("All Products", "Complete product catalogue", None),
        tab("Low Stock", "Products below their reorder level", Some("low-stock")),
        tab("Out of Stock", "Products that are sold out", Some("out-of-stock")),
    ];
    content.modal = Some(ModalForm::new(
        "Add New Product",
        "Fill in the details to add a new product",
        &[
            ("Product Name", "Enter product name"),
            ("Category", "Select category"),
            ("SKU", "ABC-001"),
            ("Cost Price", "0.00"),
            ("Selling Price", "0.00"),
            ("Initial Stock", "0"),
            ("Warehouse", "Select warehouse"),
            ("Supplier", "Select supplier"),
        ],
        "Add Product",
    ));
    content
}

fn ecommerce() -> PageContent {
    let mut content = PageContent::new(
        Page::Ecommerce,
        "Shokher Mela",
        "Manage orders, products, and customers",
    );
    let orders = mock::ORDERS;
    let revenue: f64 = orders.iter().map(|o| o.total).sum();
    let count = |status: &str| orders.iter().filter(|o| o.status == status).count();
    content.stats = vec![
        StatCard::new("Total Orders", orders.len()).change(12),
        StatCard::new("Revenue", currency(revenue)).change(23),
        StatCard::new("Pending", count("pending")),
        StatCard::new("Delivered", count("delivered")),
        StatCard::new("Customers", mock::CUSTOMERS.len()).change(8),
    ];
    content.tabs = vec![
        Tab::new(
            "Orders",
            "Recent customer orders",
            DataTable::new(mock::records(orders), order_columns())
                .search_key("customer")
                .page_size(10),
        ),
        Tab::new(
            "Products",
            "Products listed in the shop",
            DataTable::new(mock::records(mock::PRODUCTS), product_columns())
                .search_key("name")
                .page_size(10),
        ),
        Tab::new(
            "Customers",
            "Registered shop customers",
            DataTable::new(mock::records(mock::CUSTOMERS), customer_columns())
                .search_key("name")
                .page_size(10),
        ),
        // After the sidebar children so their tab indexes stay put
        Tab::new(
            "Order Tracking",
            "Track active orders",
            DataTable::new(
                mock::records(
                    orders
                        .iter()
                        .filter(|o| o.status != "delivered" && o.status != "cancelled"),
                ),
                tracking_columns(),
            )
            .search_key("customer")
            .page_size(10),
        ),
    ];
    content
}

fn real_estate() -> PageContent {
    let mut content = PageContent::new(
        Page::RealEstate,
        "SK Real Estate",
        "Manage properties, rentals, and offers",
    );
    let properties = mock::PROPERTIES;
    let count = |status: &str| properties.iter().filter(|p| p.status == status).count();
    let kind = |k: &str| properties.iter().filter(|p| p.kind == k).count() as u64;
    let total: u64 = properties.iter().map(|p| p.price as u64).sum();
    content.stats = vec![
        StatCard::new("Total Properties", properties.len()).change(15),
        StatCard::new("Available", count("available")),
        StatCard::new("Rented", count("rented")),
        StatCard::new("Monthly Revenue", currency(total as f64)).change(23),
    ];
    content.charts = vec![
        Chart::new(
            "Property Types",
            "Listings by type",
            [
                ("Apartments", kind("apartment")),
                ("Houses", kind("house")),
                ("Commercial", kind("commercial")),
                ("Land", kind("land")),
            ],
        ),
        Chart::new(
            "Locations",
            "Listings by location",
            mock::LOCATIONS.iter().map(|&(l, c, _)| (l, c as u64)),
        ),
    ];

    let tab = |title: &str, description: &str, statuses: &[&str]| {
        let items = properties
            .iter()
            .filter(|p| statuses.is_empty() || statuses.contains(&p.status));
        Tab::new(
            title,
            description,
            DataTable::new(mock::records(items), property_columns())
                .search_key("title")
                .page_size(10),
        )
    };
    content.tabs = vec![
        tab("All Properties", "Every listed property", &[]),
        tab("Rentals", "Available and rented properties", &["available", "rented"]),
        tab("Offers", "Properties with pending offers", &["pending"]),
    ];
    content
}

fn crm() -> PageContent {
    let mut content = PageContent::new(
        Page::Crm,
        "CRM",
        "Manage customer relationships and sales pipeline",
    );
    let customers = mock::CUSTOMERS;
    let active = customers.iter().filter(|c| c.status == "active").count();
    let revenue: f64 = customers.iter().map(|c| c.total_spent).sum();
    let orders: u32 = customers.iter().map(|c| c.total_orders).sum();
    let average = if orders == 0 { 0.0 } else { revenue / orders as f64 };
    content.stats = vec![
        StatCard::new("Total Customers", customers.len()).change(15),
        StatCard::new("Active Customers", active),
        StatCard::new("Total Revenue", currency(revenue)).change(23),
        StatCard::new("Avg Order Value", currency_cents(average)),
    ];
    content.charts = vec![Chart::new(
        "Sales Pipeline",
        "Open deals per stage",
        mock::PIPELINE.iter().map(|s| (s.name, s.count as u64)),
    )];
    let lead_columns = vec![
        ColumnDescriptor::new("name", "Lead").sortable(true),
        ColumnDescriptor::new("company", "Company").render(|r: &Record| {
            let company = r.text("company");
            if company.is_empty() { "Individual".to_string() } else { company }
        }),
        ColumnDescriptor::status("status", "Status"),
        ColumnDescriptor::new("last_contact", "Last Contact").sortable(true),
    ];
    let follow_up_columns = vec![
        ColumnDescriptor::new("task", "Task"),
        ColumnDescriptor::new("due", "Due"),
        ColumnDescriptor::status("priority", "Priority"),
    ];
    content.tabs = vec![
        Tab::new(
            "Customers",
            "Manage your customer relationships",
            DataTable::new(mock::records(customers), customer_columns())
                .search_key("name")
                .page_size(10),
        ),
        Tab::new(
            "Leads",
            "Track and convert potential customers",
            DataTable::new(mock::records(customers.iter().take(6)), lead_columns)
                .search_key("name")
                .page_size(10),
        ),
        Tab::new(
            "Tasks",
            "Manage your customer interaction tasks",
            DataTable::new(mock::records(mock::FOLLOW_UPS), follow_up_columns)
                .search_key("task")
                .page_size(10),
        ),
    ];
    content
}

fn finance() -> PageContent {
    let mut content = PageContent::new(
        Page::Finance,
        "Finance",
        "Track income, expenses, and financial health",
    );
    let transactions = mock::TRANSACTIONS;
    let sum = |kind: &str| -> f64 {
        transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    };
    let income = sum("income");
    let expense = sum("expense");
    let profit = income - expense;
    let margin = if income == 0.0 { 0.0 } else { profit / income * 100.0 };
    content.stats = vec![
        StatCard::new("Total Income", currency(income)).change(18),
        StatCard::new("Total Expenses", currency(expense)).change(5),
        StatCard::new("Net Profit", currency(profit)).change(if profit > 0.0 { 23 } else { -8 }),
        StatCard::new("Profit Margin", format!("{margin:.1}%")),
    ];
    content.charts = vec![
        Chart::new(
            "Revenue",
            "Monthly revenue",
            mock::REVENUE.iter().map(|m| (m.month, m.revenue as u64)),
        ),
        Chart::new(
            "Expenses",
            "Monthly expenses",
            mock::REVENUE.iter().map(|m| (m.month, m.expenses as u64)),
        ),
        Chart::new(
            "Profit",
            "Monthly profit",
            mock::REVENUE.iter().map(|m| (m.month, m.profit as u64)),
        ),
    ];

    let tab = |title: &str, description: &str, kind: Option<&str>| {
        let items = transactions
            .iter()
            .filter(|t| kind.is_none_or(|k| t.kind == k));
        Tab::new(
            title,
            description,
            DataTable::new(mock::records(items), transaction_columns())
                .search_key("description")
                .page_size(10),
        )
    };
    content.tabs = vec![
        tab("All Transactions", "Every booked transaction", None),
        tab("Income", "Incoming payments", Some("income")),
        tab("Expenses", "Outgoing payments", Some("expense")),
    ];
    content
}

const TASK_STATUSES: [(&str, &str); 4] = [
    ("todo", "To Do"),
    ("in-progress", "In Progress"),
    ("review", "Review"),
    ("done", "Done"),
];

fn projects(today: NaiveDate) -> PageContent {
    let mut content = PageContent::new(
        Page::Projects,
        "Projects",
        "Manage tasks and track project progress",
    );
    let tasks = mock::TASKS;
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.status == "done").count();
    let in_progress = tasks.iter().filter(|t| t.status == "in-progress").count();
    let overdue = tasks.iter().filter(|t| is_overdue(t, today)).count();
    let completion = if total == 0 {
        0
    } else {
        (completed as f64 / total as f64 * 100.0).round() as i32
    };
    content.stats = vec![
        StatCard::new("Total Tasks", total),
        StatCard::new("Completed", completed).change(completion),
        StatCard::new("In Progress", in_progress),
        StatCard::new("Overdue", overdue),
    ];
    content.progress = Some(Progress {
        title: "Project Progress".to_string(),
        description: "Overall task completion".to_string(),
        done: completed,
        total,
    });

    let mut members: Vec<(&str, u64)> = Vec::new();
    for task in tasks {
        match members.iter_mut().find(|(name, _)| *name == task.assignee) {
            Some((_, n)) => *n += 1,
            None => members.push((task.assignee, 1)),
        }
    }
    content.charts = vec![
        Chart::new(
            "Task Board",
            "Tasks per status",
            TASK_STATUSES.iter().map(|&(status, label)| {
                (label, tasks.iter().filter(|t| t.status == status).count() as u64)
            }),
        ),
        Chart::new("Team Members", "Tasks per person", members),
    ];

    let columns = vec![
        ColumnDescriptor::new("title", "Task").sortable(true),
        ColumnDescriptor::new("assignee", "Assignee").sortable(true),
        ColumnDescriptor::status("priority", "Priority"),
        ColumnDescriptor::new("due_date", "Due").sortable(true),
        ColumnDescriptor::new("status", "Status").render(|r: &Record| {
            let status = r.text("status");
            TASK_STATUSES
                .iter()
                .find(|(s, _)| *s == status)
                .map(|(_, label)| label.to_string())
                .unwrap_or(status)
        }),
    ];
    content.tabs = vec![Tab::new(
        "Tasks",
        "Project board",
        DataTable::new(mock::records(tasks), columns)
            .search_key("title")
            .page_size(10),
    )];
    content
}

pub fn is_overdue(task: &mock::Task, today: NaiveDate) -> bool {
    task.status != "done"
        && NaiveDate::parse_from_str(task.due_date, "%Y-%m-%d").is_ok_and(|due| due < today)
}

fn reports() -> PageContent {
    let mut content = PageContent::new(
        Page::Reports,
        "Reports & Analytics",
        "Generate and analyze business reports",
    );
    content.stats = mock::REPORT_CARDS
        .iter()
        .map(|c| StatCard::new(c.title, c.description))
        .collect();
    content.charts = vec![
        Chart::new(
            "Department Headcount",
            "Employees per department",
            mock::HEADCOUNT_SUMMARY.iter().map(|&(n, v)| (n, v as u64)),
        ),
        Chart::new(
            "Sales by Category",
            "Revenue per product category",
            mock::SALES_BY_CATEGORY.iter().map(|&(n, v)| (n, v as u64)),
        ),
    ];
    let columns = vec![
        ColumnDescriptor::new("title", "Report").sortable(true),
        ColumnDescriptor::new("description", "Description"),
    ];
    content.tabs = vec![Tab::new(
        "Available Reports",
        "Reports that can be generated",
        DataTable::new(mock::records(mock::REPORT_CARDS), columns)
            .search_key("title")
            .page_size(10),
    )];
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat<'a>(content: &'a PageContent, title: &str) -> &'a StatCard {
        content
            .stats
            .iter()
            .find(|s| s.title == title)
            .unwrap_or_else(|| panic!("no stat card {title}"))
    }

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn currency_formats_with_and_without_cents() {
        assert_eq!(currency(95000.0), "$95,000");
        assert_eq!(currency(1890.5), "$1,890.50");
        assert_eq!(currency(-8500.0), "-$8,500");
        assert_eq!(currency_cents(179.98), "$179.98");
        assert_eq!(currency_cents(45.0), "$45.00");
    }

    #[test]
    fn stat_card_change_text() {
        let up = StatCard::new("Revenue", "$1").change(23);
        assert_eq!(up.trend(), Some(Trend::Increase));
        assert_eq!(up.change_text().as_deref(), Some("+23% vs last month"));
        let down = StatCard::new("Orders", 3).change(-3);
        assert_eq!(down.trend(), Some(Trend::Decrease));
        assert_eq!(down.change_text().as_deref(), Some("-3% vs last month"));
        assert_eq!(StatCard::new("Plain", 1).trend(), None);
    }

    #[test]
    fn every_page_builds_with_at_least_one_table() {
        let config = ERPConfig::default();
        let pages = build_all(&config);
        assert_eq!(pages.len(), Page::ALL.len());
        for (content, page) in pages.iter().zip(Page::ALL) {
            assert_eq!(content.page, page);
            assert!(!content.tabs.is_empty(), "{page:?} has no table");
        }
    }

    #[test]
    fn inventory_aggregates() {
        let content = inventory();
        assert_eq!(stat(&content, "Total Stock").value, "603");
        assert_eq!(stat(&content, "Low Stock").value, "2");
        assert_eq!(stat(&content, "Out of Stock").value, "1");
        // 150*45 + 8*12 + 200*8 + 0 + 45*120 + 5*18 + 120*15 + 75*65
        assert_eq!(stat(&content, "Inventory Value").value, "$20,611");
        let tab_sizes: Vec<usize> = content.tabs.iter().map(|t| t.table.filtered_len()).collect();
        assert_eq!(tab_sizes, vec![8, 2, 1]);
    }

    #[test]
    fn finance_aggregates() {
        let content = finance();
        assert_eq!(stat(&content, "Total Income").value, "$52,420");
        assert_eq!(stat(&content, "Total Expenses").value, "$60,100");
        assert_eq!(stat(&content, "Net Profit").value, "-$7,680");
        assert_eq!(stat(&content, "Net Profit").change, Some(-8));
        assert_eq!(stat(&content, "Profit Margin").value, "-14.7%");
    }

    #[test]
    fn crm_average_order_value() {
        let content = crm();
        assert_eq!(stat(&content, "Total Revenue").value, "$13,550.50");
        // 13550.5 / 59 orders
        assert_eq!(stat(&content, "Avg Order Value").value, "$229.67");
        assert_eq!(stat(&content, "Active Customers").value, "4");
    }

    #[test]
    fn crm_tabs_cover_customers_leads_and_follow_ups() {
        let content = crm();
        assert_eq!(content.title, "CRM");
        assert_eq!(content.subtitle, "Manage customer relationships and sales pipeline");
        let sizes: Vec<usize> = content.tabs.iter().map(|t| t.table.filtered_len()).collect();
        assert_eq!(sizes, vec![5, 5, 4]);

        let leads = &content.tabs[1].table;
        let company = leads.columns().iter().find(|c| c.key == "company").unwrap();
        let emma = leads.records().iter().find(|r| r.text("name") == "Emma Wilson").unwrap();
        assert_eq!(leads.cell_text(emma, company), "Individual");

        let tasks = &content.tabs[2].table;
        let priority = tasks.columns().iter().find(|c| c.key == "priority").unwrap();
        assert_eq!(tasks.cell_text(&tasks.records()[0], priority), "High");
    }

    #[test]
    fn order_tracking_lists_open_orders() {
        let content = ecommerce();
        assert_eq!(content.tabs[3].title, "Order Tracking");
        let table = &content.tabs[3].table;
        let ids: Vec<String> = table.records().iter().map(|r| r.text("id")).collect();
        assert_eq!(ids, vec!["ORD-002", "ORD-003", "ORD-004"]);
        assert_eq!(order_stepper("shipped"), "■■■□");
        assert_eq!(order_stepper("pending"), "■□□□");
        assert_eq!(order_stepper("cancelled"), "□□□□");
    }

    #[test]
    fn project_progress_and_board_counts() {
        let content = projects(NaiveDate::from_ymd_opt(2024, 1, 26).unwrap());
        let progress = content.progress.as_ref().unwrap();
        assert_eq!(progress.label(), "1 of 6 tasks completed (17%)");

        let board = content.charts.iter().find(|c| c.title == "Task Board").unwrap();
        let counts: Vec<u64> = board.bars.iter().map(|(_, v)| *v).collect();
        assert_eq!(counts, vec![2, 2, 1, 1]);
        assert_eq!(board.bars[0].0, "To Do");

        let team = content.charts.iter().find(|c| c.title == "Team Members").unwrap();
        assert_eq!(team.bars.len(), 6);
        assert!(team.bars.iter().all(|(_, v)| *v == 1));
        assert_eq!(team.bars[0].0, "Sarah Johnson");
    }

    #[test]
    fn empty_progress_is_zero_percent() {
        let progress = Progress {
            title: String::new(),
            description: String::new(),
            done: 0,
            total: 0,
        };
        assert_eq!(progress.ratio(), 0.0);
        assert_eq!(progress.label(), "0 of 0 tasks completed (0%)");
    }

    #[test]
    fn dashboard_charts_revenue_and_profit_separately() {
        let content = dashboard();
        let titles: Vec<&str> = content.charts.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Revenue Overview", "Profit Overview", "Department Distribution"]);
        assert_eq!(content.charts[0].description, "Monthly revenue trends");
        assert_eq!(content.charts[1].bars.len(), mock::REVENUE.len());
        assert_eq!(content.charts[1].bars[0].1, mock::REVENUE[0].profit as u64);
    }

    #[test]
    fn reports_list_every_report_card() {
        let content = reports();
        let table = &content.tabs[0].table;
        assert_eq!(table.filtered_len(), mock::REPORT_CARDS.len());
        assert_eq!(table.records()[0].text("title"), mock::REPORT_CARDS[0].title);
    }

    #[test]
    fn payroll_totals() {
        let content = payroll();
        // 98% of the summed salaries 660000
        assert_eq!(stat(&content, "Total Payroll").value, "$646,800");
        assert_eq!(stat(&content, "Avg. Salary").value, "$80,850");
        assert_eq!(stat(&content, "Total Tax").value, "$79,200");
    }

    #[test]
    fn overdue_tasks_depend_on_today() {
        let early = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let late = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(stat(&projects(early), "Overdue").value, "0");
        assert_eq!(stat(&projects(late), "Overdue").value, "5");
        assert_eq!(stat(&projects(late), "Completed").change, Some(17));
    }

    #[test]
    fn real_estate_tabs_filter_by_status() {
        let content = real_estate();
        let sizes: Vec<usize> = content.tabs.iter().map(|t| t.table.filtered_len()).collect();
        assert_eq!(sizes, vec![6, 5, 1]);
        let table = &content.tabs[0].table;
        let land = table.records().iter().find(|r| r.text("type") == "land").unwrap();
        let price = table.columns().iter().find(|c| c.key == "price").unwrap();
        assert_eq!(table.cell_text(land, price), "$150,000");
    }

    #[test]
    fn page_size_override_applies_to_all_tabs() {
        let config = ERPConfig {
            page_size: Some(3),
            ..ERPConfig::default()
        };
        let content = build(Page::Inventory, &config);
        assert!(content.tabs.iter().all(|t| t.table.get_page_size() == 3));
        assert_eq!(content.tabs[0].table.page_count(), 3);
    }

    #[test]
    fn roles_cycle_back_to_super_admin() {
        let mut role = Role::default();
        for _ in 0..5 {
            role = role.next();
        }
        assert_eq!(role, Role::SuperAdmin);
        assert_eq!(Role::Accountant.permissions(), &["finance", "payroll", "reports"]);
    }
}
