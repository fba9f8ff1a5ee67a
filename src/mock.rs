// Sample business data every page is rendered from.

use crate::record::Record;

pub trait ToRecord {
    fn to_record(&self) -> Record;
}

pub fn records<'a, T: ToRecord + 'a>(items: impl IntoIterator<Item = &'a T>) -> Vec<Record> {
    items.into_iter().map(ToRecord::to_record).collect()
}

#[derive(Debug, Clone, Copy)]
pub struct Employee {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub department: &'static str,
    pub role: &'static str,
    pub salary: u32,
    pub join_date: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub sku: &'static str,
    pub stock: u32,
    pub cost_price: f64,
    pub selling_price: f64,
    pub supplier: &'static str,
    pub warehouse: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct OrderLine {
    pub name: &'static str,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Order {
    pub id: &'static str,
    pub customer: &'static str,
    pub email: &'static str,
    pub products: &'static [OrderLine],
    pub total: f64,
    pub status: &'static str,
    pub date: &'static str,
    pub payment_status: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Property {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: &'static str,
    pub location: &'static str,
    pub price: u32,
    pub status: &'static str,
    pub owner: &'static str,
    pub listing_date: &'static str,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Customer {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub company: Option<&'static str>,
    pub total_orders: u32,
    pub total_spent: f64,
    pub status: &'static str,
    pub last_contact: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Transaction {
    pub id: &'static str,
    pub kind: &'static str,
    pub category: &'static str,
    pub amount: f64,
    pub description: &'static str,
    pub date: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Department {
    pub id: &'static str,
    pub name: &'static str,
    pub employee_count: u32,
    pub budget: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct MonthlyRevenue {
    pub month: &'static str,
    pub revenue: u32,
    pub expenses: u32,
    pub profit: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Task {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub assignee: &'static str,
    pub priority: &'static str,
    pub due_date: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct FollowUp {
    pub task: &'static str,
    pub due: &'static str,
    pub priority: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct PipelineStage {
    pub name: &'static str,
    pub count: u32,
    pub value: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ReportCard {
    pub title: &'static str,
    pub description: &'static str,
}

pub const EMPLOYEES: &[Employee] = &[
    Employee { id: "1", name: "Sarah Johnson", email: "sarah@company.com", department: "Engineering", role: "Senior Developer", salary: 95000, join_date: "2022-03-15", status: "active" },
    Employee { id: "2", name: "Michael Chen", email: "michael@company.com", department: "Design", role: "UI/UX Lead", salary: 85000, join_date: "2021-08-20", status: "active" },
    Employee { id: "3", name: "Emily Davis", email: "emily@company.com", department: "Marketing", role: "Marketing Manager", salary: 78000, join_date: "2020-11-10", status: "active" },
    Employee { id: "4", name: "James Wilson", email: "james@company.com", department: "Sales", role: "Sales Director", salary: 92000, join_date: "2019-05-22", status: "active" },
    Employee { id: "5", name: "Lisa Anderson", email: "lisa@company.com", department: "HR", role: "HR Manager", salary: 72000, join_date: "2021-02-14", status: "active" },
    Employee { id: "6", name: "David Brown", email: "david@company.com", department: "Engineering", role: "Backend Developer", salary: 88000, join_date: "2022-07-01", status: "on-leave" },
    Employee { id: "7", name: "Amanda Martinez", email: "amanda@company.com", department: "Finance", role: "Accountant", salary: 68000, join_date: "2020-09-18", status: "active" },
    Employee { id: "8", name: "Robert Taylor", email: "robert@company.com", department: "Operations", role: "Operations Lead", salary: 82000, join_date: "2021-04-25", status: "active" },
];

pub const PRODUCTS: &[Product] = &[
    Product { id: "1", name: "Wireless Bluetooth Headphones", category: "Electronics", sku: "WBH-001", stock: 150, cost_price: 45.0, selling_price: 89.99, supplier: "TechSupply Co", warehouse: "Warehouse A", status: "in-stock" },
    Product { id: "2", name: "Organic Cotton T-Shirt", category: "Apparel", sku: "OCT-002", stock: 8, cost_price: 12.0, selling_price: 34.99, supplier: "GreenWear Ltd", warehouse: "Warehouse B", status: "low-stock" },
    Product { id: "3", name: "Stainless Steel Water Bottle", category: "Home & Living", sku: "SWB-003", stock: 200, cost_price: 8.0, selling_price: 24.99, supplier: "EcoProducts Inc", warehouse: "Warehouse A", status: "in-stock" },
    Product { id: "4", name: "Leather Wallet", category: "Accessories", sku: "LW-004", stock: 0, cost_price: 25.0, selling_price: 59.99, supplier: "LuxuryGoods Co", warehouse: "Warehouse C", status: "out-of-stock" },
    Product { id: "5", name: "Smart Watch Pro", category: "Electronics", sku: "SWP-005", stock: 45, cost_price: 120.0, selling_price: 249.99, supplier: "TechSupply Co", warehouse: "Warehouse A", status: "in-stock" },
    Product { id: "6", name: "Yoga Mat Premium", category: "Sports", sku: "YMP-006", stock: 5, cost_price: 18.0, selling_price: 45.99, supplier: "FitLife Supplies", warehouse: "Warehouse B", status: "low-stock" },
    Product { id: "7", name: "Ceramic Coffee Mug Set", category: "Home & Living", sku: "CCM-007", stock: 120, cost_price: 15.0, selling_price: 39.99, supplier: "HomeDecor Pro", warehouse: "Warehouse C", status: "in-stock" },
    Product { id: "8", name: "Running Shoes Elite", category: "Sports", sku: "RSE-008", stock: 75, cost_price: 65.0, selling_price: 129.99, supplier: "FitLife Supplies", warehouse: "Warehouse A", status: "in-stock" },
];

pub const ORDERS: &[Order] = &[
    Order { id: "ORD-001", customer: "John Smith", email: "john@email.com", products: &[OrderLine { name: "Wireless Bluetooth Headphones", quantity: 2, price: 89.99 }], total: 179.98, status: "delivered", date: "2024-01-15", payment_status: "paid" },
    Order { id: "ORD-002", customer: "Emma Wilson", email: "emma@email.com", products: &[OrderLine { name: "Smart Watch Pro", quantity: 1, price: 249.99 }, OrderLine { name: "Leather Wallet", quantity: 1, price: 59.99 }], total: 309.98, status: "shipped", date: "2024-01-18", payment_status: "paid" },
    Order { id: "ORD-003", customer: "Michael Brown", email: "michael@email.com", products: &[OrderLine { name: "Running Shoes Elite", quantity: 1, price: 129.99 }], total: 129.99, status: "processing", date: "2024-01-20", payment_status: "paid" },
    Order { id: "ORD-004", customer: "Sophie Davis", email: "sophie@email.com", products: &[OrderLine { name: "Yoga Mat Premium", quantity: 2, price: 45.99 }], total: 91.98, status: "pending", date: "2024-01-21", payment_status: "pending" },
    Order { id: "ORD-005", customer: "Chris Johnson", email: "chris@email.com", products: &[OrderLine { name: "Ceramic Coffee Mug Set", quantity: 3, price: 39.99 }], total: 119.97, status: "cancelled", date: "2024-01-19", payment_status: "failed" },
    Order { id: "ORD-006", customer: "Anna Taylor", email: "anna@email.com", products: &[OrderLine { name: "Organic Cotton T-Shirt", quantity: 4, price: 34.99 }], total: 139.96, status: "delivered", date: "2024-01-14", payment_status: "paid" },
];

pub const PROPERTIES: &[Property] = &[
    Property { id: "1", title: "Modern Downtown Apartment", kind: "apartment", location: "Downtown, NYC", price: 2500, status: "available", owner: "SK Real Estate", listing_date: "2024-01-10", bedrooms: Some(2), bathrooms: Some(2), area: 1200 },
    Property { id: "2", title: "Suburban Family House", kind: "house", location: "Brooklyn, NYC", price: 4500, status: "rented", owner: "SK Real Estate", listing_date: "2023-12-15", bedrooms: Some(4), bathrooms: Some(3), area: 2800 },
    Property { id: "3", title: "Commercial Office Space", kind: "commercial", location: "Manhattan, NYC", price: 8500, status: "available", owner: "SK Real Estate", listing_date: "2024-01-05", bedrooms: None, bathrooms: None, area: 3500 },
    Property { id: "4", title: "Beachfront Villa", kind: "house", location: "Miami, FL", price: 12000, status: "pending", owner: "SK Real Estate", listing_date: "2024-01-18", bedrooms: Some(5), bathrooms: Some(4), area: 4500 },
    Property { id: "5", title: "Investment Land Plot", kind: "land", location: "Austin, TX", price: 150000, status: "available", owner: "SK Real Estate", listing_date: "2023-11-20", bedrooms: None, bathrooms: None, area: 10000 },
    Property { id: "6", title: "Luxury Penthouse Suite", kind: "apartment", location: "Manhattan, NYC", price: 15000, status: "available", owner: "SK Real Estate", listing_date: "2024-01-12", bedrooms: Some(3), bathrooms: Some(3), area: 2200 },
];

pub const CUSTOMERS: &[Customer] = &[
    Customer { id: "1", name: "John Smith", email: "john@email.com", phone: "+1 234 567 8901", company: Some("Smith Corp"), total_orders: 15, total_spent: 2450.00, status: "active", last_contact: "2024-01-20" },
    Customer { id: "2", name: "Emma Wilson", email: "emma@email.com", phone: "+1 234 567 8902", company: None, total_orders: 8, total_spent: 1890.50, status: "active", last_contact: "2024-01-18" },
    Customer { id: "3", name: "Michael Brown", email: "michael@email.com", phone: "+1 234 567 8903", company: Some("Brown Industries"), total_orders: 22, total_spent: 5670.00, status: "active", last_contact: "2024-01-21" },
    Customer { id: "4", name: "Sophie Davis", email: "sophie@email.com", phone: "+1 234 567 8904", company: None, total_orders: 3, total_spent: 340.00, status: "inactive", last_contact: "2023-12-15" },
    Customer { id: "5", name: "Chris Johnson", email: "chris@email.com", phone: "+1 234 567 8905", company: Some("Johnson LLC"), total_orders: 11, total_spent: 3200.00, status: "active", last_contact: "2024-01-19" },
];

pub const TRANSACTIONS: &[Transaction] = &[
    Transaction { id: "1", kind: "income", category: "Product Sales", amount: 15420.00, description: "January product sales revenue", date: "2024-01-20", status: "completed" },
    Transaction { id: "2", kind: "expense", category: "Payroll", amount: 45000.00, description: "Monthly payroll expenses", date: "2024-01-15", status: "completed" },
    Transaction { id: "3", kind: "income", category: "Rental Income", amount: 28500.00, description: "Property rental income", date: "2024-01-18", status: "completed" },
    Transaction { id: "4", kind: "expense", category: "Inventory", amount: 12300.00, description: "Stock replenishment", date: "2024-01-17", status: "completed" },
    Transaction { id: "5", kind: "expense", category: "Utilities", amount: 2800.00, description: "Office utilities", date: "2024-01-10", status: "completed" },
    Transaction { id: "6", kind: "income", category: "Services", amount: 8500.00, description: "Consulting services", date: "2024-01-21", status: "pending" },
];

pub const DEPARTMENTS: &[Department] = &[
    Department { id: "1", name: "Engineering", employee_count: 24, budget: 450000 },
    Department { id: "2", name: "Design", employee_count: 12, budget: 180000 },
    Department { id: "3", name: "Marketing", employee_count: 15, budget: 220000 },
    Department { id: "4", name: "Sales", employee_count: 20, budget: 350000 },
    Department { id: "5", name: "HR", employee_count: 8, budget: 120000 },
    Department { id: "6", name: "Finance", employee_count: 10, budget: 150000 },
    Department { id: "7", name: "Operations", employee_count: 18, budget: 280000 },
];

pub const REVENUE: &[MonthlyRevenue] = &[
    MonthlyRevenue { month: "Jan", revenue: 45000, expenses: 32000, profit: 13000 },
    MonthlyRevenue { month: "Feb", revenue: 52000, expenses: 35000, profit: 17000 },
    MonthlyRevenue { month: "Mar", revenue: 48000, expenses: 33000, profit: 15000 },
    MonthlyRevenue { month: "Apr", revenue: 61000, expenses: 38000, profit: 23000 },
    MonthlyRevenue { month: "May", revenue: 55000, expenses: 36000, profit: 19000 },
    MonthlyRevenue { month: "Jun", revenue: 67000, expenses: 42000, profit: 25000 },
    MonthlyRevenue { month: "Jul", revenue: 72000, expenses: 45000, profit: 27000 },
    MonthlyRevenue { month: "Aug", revenue: 69000, expenses: 43000, profit: 26000 },
    MonthlyRevenue { month: "Sep", revenue: 75000, expenses: 47000, profit: 28000 },
    MonthlyRevenue { month: "Oct", revenue: 82000, expenses: 51000, profit: 31000 },
    MonthlyRevenue { month: "Nov", revenue: 88000, expenses: 54000, profit: 34000 },
    MonthlyRevenue { month: "Dec", revenue: 95000, expenses: 58000, profit: 37000 },
];

pub const PAYROLL_EXPENSE: &[(&str, u32)] = &[
    ("Jan", 385000),
    ("Feb", 392000),
    ("Mar", 388000),
    ("Apr", 405000),
    ("May", 412000),
    ("Jun", 420000),
];

pub const TASKS: &[Task] = &[
    Task { id: "1", title: "Design new dashboard layout", description: "Create wireframes for the new admin dashboard", assignee: "Sarah Johnson", priority: "high", due_date: "2024-01-25", status: "in-progress" },
    Task { id: "2", title: "Implement user authentication", description: "Add OAuth support for Google and GitHub", assignee: "Michael Chen", priority: "high", due_date: "2024-01-28", status: "todo" },
    Task { id: "3", title: "Fix payment gateway bug", description: "Resolve timeout issues with Stripe integration", assignee: "David Brown", priority: "high", due_date: "2024-01-24", status: "review" },
    Task { id: "4", title: "Update inventory module", description: "Add barcode scanning functionality", assignee: "Emily Davis", priority: "medium", due_date: "2024-01-30", status: "todo" },
    Task { id: "5", title: "Create API documentation", description: "Document all REST endpoints", assignee: "James Wilson", priority: "low", due_date: "2024-02-05", status: "in-progress" },
    Task { id: "6", title: "Performance optimization", description: "Optimize database queries for reports", assignee: "Lisa Anderson", priority: "medium", due_date: "2024-02-01", status: "done" },
];

pub const FOLLOW_UPS: &[FollowUp] = &[
    FollowUp { task: "Follow up with John Smith", due: "Today", priority: "high" },
    FollowUp { task: "Send proposal to Michael Brown", due: "Tomorrow", priority: "medium" },
    FollowUp { task: "Schedule demo for Emma Wilson", due: "In 3 days", priority: "low" },
    FollowUp { task: "Review contract with Chris Johnson", due: "Next week", priority: "medium" },
];

pub const PIPELINE: &[PipelineStage] = &[
    PipelineStage { name: "New Leads", count: 12, value: 45000 },
    PipelineStage { name: "Contacted", count: 8, value: 32000 },
    PipelineStage { name: "Qualified", count: 5, value: 28000 },
    PipelineStage { name: "Proposal", count: 3, value: 18000 },
    PipelineStage { name: "Closed Won", count: 2, value: 12000 },
];

pub const SALES_BY_CATEGORY: &[(&str, u32)] = &[
    ("Electronics", 45000),
    ("Apparel", 28000),
    ("Home", 32000),
    ("Sports", 18000),
    ("Accessories", 15000),
];

pub const HEADCOUNT_SUMMARY: &[(&str, u32)] = &[
    ("Engineering", 24),
    ("Sales", 20),
    ("Marketing", 15),
    ("Design", 12),
    ("Others", 29),
];

/// (location, listings, value)
pub const LOCATIONS: &[(&str, u32, u32)] = &[
    ("Manhattan", 12, 85000),
    ("Brooklyn", 8, 45000),
    ("Miami", 5, 62000),
    ("Austin", 3, 28000),
];

pub const REPORT_CARDS: &[ReportCard] = &[
    ReportCard { title: "HR Analytics", description: "Employee metrics and trends" },
    ReportCard { title: "Payroll Summary", description: "Salary and compensation data" },
    ReportCard { title: "Product Sales", description: "Inventory and sales analysis" },
    ReportCard { title: "Rental Earnings", description: "Property income reports" },
];

impl ToRecord for Employee {
    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("name", self.name)
            .with("email", self.email)
            .with("department", self.department)
            .with("role", self.role)
            .with("salary", self.salary)
            .with("join_date", self.join_date)
            .with("status", self.status)
    }
}

impl ToRecord for Product {
    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("name", self.name)
            .with("category", self.category)
            .with("sku", self.sku)
            .with("stock", self.stock)
            .with("cost_price", self.cost_price)
            .with("selling_price", self.selling_price)
            .with("supplier", self.supplier)
            .with("warehouse", self.warehouse)
            .with("status", self.status)
    }
}

impl ToRecord for OrderLine {
    fn to_record(&self) -> Record {
        Record::new()
            .with("name", self.name)
            .with("quantity", self.quantity)
            .with("price", self.price)
    }
}

impl ToRecord for Order {
    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("customer", self.customer)
            .with("email", self.email)
            .with("products", records(self.products))
            .with("total", self.total)
            .with("status", self.status)
            .with("date", self.date)
            .with("payment_status", self.payment_status)
    }
}

impl ToRecord for Property {
    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("title", self.title)
            .with("type", self.kind)
            .with("location", self.location)
            .with("price", self.price)
            .with("status", self.status)
            .with("owner", self.owner)
            .with("listing_date", self.listing_date)
            .with("bedrooms", self.bedrooms)
            .with("bathrooms", self.bathrooms)
            .with("area", self.area)
    }
}

impl ToRecord for Customer {
    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("name", self.name)
            .with("email", self.email)
            .with("phone", self.phone)
            .with("company", self.company)
            .with("total_orders", self.total_orders)
            .with("total_spent", self.total_spent)
            .with("status", self.status)
            .with("last_contact", self.last_contact)
    }
}

impl ToRecord for Transaction {
    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("type", self.kind)
            .with("category", self.category)
            .with("amount", self.amount)
            .with("description", self.description)
            .with("date", self.date)
            .with("status", self.status)
    }
}

impl ToRecord for Task {
    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("title", self.title)
            .with("description", self.description)
            .with("assignee", self.assignee)
            .with("priority", self.priority)
            .with("due_date", self.due_date)
            .with("status", self.status)
    }
}

impl ToRecord for FollowUp {
    fn to_record(&self) -> Record {
        Record::new()
            .with("task", self.task)
            .with("due", self.due)
            .with("priority", self.priority)
    }
}

impl ToRecord for ReportCard {
    fn to_record(&self) -> Record {
        Record::new()
            .with("title", self.title)
            .with("description", self.description)
    }
}

/// Payroll line derived from an employee's yearly salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollRow {
    pub id: &'static str,
    pub name: &'static str,
    pub department: &'static str,
    pub basic: u32,
    pub bonus: u32,
    pub overtime: u32,
    pub tax: u32,
    pub deductions: u32,
    pub net_salary: u32,
}

impl PayrollRow {
    pub fn from_employee(idx: usize, emp: &Employee) -> Self {
        let share = |rate: f64| (emp.salary as f64 * rate).round() as u32;
        Self {
            id: emp.id,
            name: emp.name,
            department: emp.department,
            basic: share(0.6),
            bonus: share(0.15),
            // fixed stand-in for a figure the dashboard only ever shows as illustration
            overtime: ((idx as u32 + 1) * 137) % 500,
            tax: share(0.12),
            deductions: share(0.05),
            net_salary: share(0.98),
        }
    }
}

impl ToRecord for PayrollRow {
    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("name", self.name)
            .with("department", self.department)
            .with("basic", self.basic)
            .with("bonus", self.bonus)
            .with("overtime", self.overtime)
            .with("tax", self.tax)
            .with("deductions", self.deductions)
            .with("net_salary", self.net_salary)
            .with("status", "processed")
    }
}

pub fn payroll() -> Vec<PayrollRow> {
    EMPLOYEES
        .iter()
        .enumerate()
        .map(|(idx, emp)| PayrollRow::from_employee(idx, emp))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payroll_rows_are_salary_shares() {
        let row = PayrollRow::from_employee(0, &EMPLOYEES[0]);
        assert_eq!(row.basic, 57000);
        assert_eq!(row.bonus, 14250);
        assert_eq!(row.tax, 11400);
        assert_eq!(row.deductions, 4750);
        assert_eq!(row.net_salary, 93100);
        assert!(row.overtime < 500);
        assert_eq!(payroll().len(), EMPLOYEES.len());
    }

    #[test]
    fn orders_keep_their_lines_as_nested_records() {
        let r = ORDERS[1].to_record();
        assert_eq!(r.text("products"), "2 item(s)");
        assert_eq!(r.number("total"), Some(309.98));
    }

    #[test]
    fn optional_fields_are_empty_values() {
        let land = PROPERTIES[4].to_record();
        assert_eq!(land.text("bedrooms"), "");
        let customer = CUSTOMERS[1].to_record();
        assert_eq!(customer.text("company"), "");
        assert_eq!(CUSTOMERS[0].to_record().text("company"), "Smith Corp");
    }

    #[test]
    fn records_converts_every_item() {
        assert_eq!(records(EMPLOYEES).len(), 8);
        assert_eq!(records(PRODUCTS.iter().filter(|p| p.status == "low-stock")).len(), 2);
    }
}
