use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use dropdash::config::Config;
use dropdash::models::{
    ClientCreate, DeliveryCreate, DeliveryStatus, DeliveryUpdate, OrderCreate,
    TransactionCategory, TransactionCreate, TransactionType, UserCreate, UserRole, UserUpdate,
};
use dropdash::pages::{
    AddOrderPage, ClientsPage, DashboardPage, DeliveriesPage, OrderBoard, OrderBoardKind,
    PreviousMonthsPage, TransactionsPage, UsersPage,
};
use dropdash::services::auth_service::{
    change_password, logout_user, register_user, verify_user_credentials, ChangePasswordForm,
    LoginForm, RegisterForm, AUTH_FALLBACK,
};
use dropdash::services::guard_service::{menu_for, GuardState, Navigator, Route, RouteGuard};
use dropdash::services::session_service::SessionContext;
use dropdash::utils::{format_amount, format_currency, format_percent, init_logging};
use log::info;

#[derive(Parser)]
#[command(name = "dropdash", version, about = "Dropshipping operations dashboard")]
struct Cli {
    /// Backend API base URL, including the /api prefix
    #[arg(long, env = "DROPDASH_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "DROPDASH_PASSWORD")]
        password: String,
    },
    /// Create an account and log in
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user and their menu
    Whoami,
    /// Change the current user's password
    ChangePassword {
        #[arg(long)]
        old_password: String,
        #[arg(long)]
        new_password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Stat cards and recent activity
    Dashboard,
    /// Client directory
    Clients {
        #[command(subcommand)]
        action: Option<ClientAction>,
    },
    /// Pending and completed orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Deliveries
    Deliveries {
        #[command(subcommand)]
        action: Option<DeliveryAction>,
    },
    /// Budget transactions
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionAction>,
    },
    /// Monthly breakdown for a year
    Monthly {
        /// Defaults to the current year
        #[arg(long)]
        year: Option<i32>,
    },
    /// User administration (admins only)
    Users {
        #[command(subcommand)]
        action: Option<UserAction>,
    },
}

#[derive(Subcommand)]
enum ClientAction {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete { id: i64 },
    /// Replace a client's notes
    Notes { id: i64, notes: String },
}

#[derive(Subcommand)]
enum OrderAction {
    Pending,
    Completed,
    Add {
        #[arg(long)]
        client_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        link: Option<String>,
        #[arg(long, default_value = "1")]
        quantity: i64,
        #[arg(long)]
        cost: f64,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "0")]
        taxes: f64,
        /// User id to assign the order to (admins only)
        #[arg(long)]
        assign_to: Option<i64>,
    },
    Complete { id: i64 },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum DeliveryAction {
    List,
    Add {
        #[arg(long)]
        order_id: i64,
        /// Defaults to the order's client location
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        tracking_number: Option<String>,
        #[arg(long)]
        driver_name: Option<String>,
        #[arg(long)]
        driver_phone: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Move a delivery to pending, in_transit, delivered or failed
    Status { id: i64, status: DeliveryStatus },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum TransactionAction {
    List,
    Add {
        #[arg(long = "type")]
        kind: TransactionType,
        #[arg(long)]
        category: TransactionCategory,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        description: Option<String>,
    },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum UserAction {
    List,
    Add {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        admin: bool,
    },
    Update {
        id: i64,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// `true` grants admin, `false` revokes it
        #[arg(long)]
        admin: Option<bool>,
    },
    Deactivate { id: i64 },
    Activate { id: i64 },
    ResetPassword { id: i64, new_password: String },
}

/// Navigation in a terminal is a hint to run another command.
struct CliNavigator;

impl Navigator for CliNavigator {
    fn navigate(&self, route: Route) {
        match route {
            Route::Login => eprintln!("Run `dropdash login` to sign in."),
            other => info!("Next: {}", other),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env().context("Failed to read configuration")?;
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    init_logging(config.log_level, config.log_file.as_deref())?;

    let ctx = SessionContext::from_config(&config);
    let nav = CliNavigator;

    match cli.command {
        Commands::Login { username, password } => {
            let form = LoginForm { username, password };
            match verify_user_credentials(&ctx, &form).await {
                Ok(capability) => println!("Logged in ({})", role_label(capability.is_admin())),
                Err(e) => bail!(e.user_message(AUTH_FALLBACK)),
            }
        }
        Commands::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            let form = RegisterForm {
                username,
                email,
                password,
                confirm_password,
            };
            match register_user(&ctx, &form).await {
                Ok(capability) => println!("Registered and logged in ({})", role_label(capability.is_admin())),
                Err(e) => bail!(e.user_message(AUTH_FALLBACK)),
            }
        }
        Commands::Logout => {
            logout_user(&ctx, &nav).await.context("Failed to clear session")?;
        }
        Commands::Whoami => {
            guard(&ctx, Route::Dashboard, &nav)?;
            let user = ctx.current_user().current_user().await?;
            println!("{} <{}> ({}, {})", user.username, user.email, user.role, active_label(user.is_active));
            for item in menu_for(ctx.capability().await) {
                println!("  {:<18} {}", item.label, item.route.path());
            }
        }
        Commands::ChangePassword {
            old_password,
            new_password,
            confirm_password,
        } => {
            guard(&ctx, Route::ChangePassword, &nav)?;
            let mut form = ChangePasswordForm {
                old_password,
                new_password,
                confirm_password,
            };
            match change_password(&ctx, &mut form).await {
                Ok(()) => println!("Password changed successfully"),
                Err(e) => bail!(e.user_message("Failed to change password")),
            }
        }
        Commands::Dashboard => {
            guard(&ctx, Route::Dashboard, &nav)?;
            cmd_dashboard(&ctx).await?;
        }
        Commands::Clients { action } => {
            guard(&ctx, Route::Clients, &nav)?;
            cmd_clients(&ctx, action.unwrap_or(ClientAction::List { search: None })).await?;
        }
        Commands::Orders { action } => {
            cmd_orders(&ctx, &nav, action).await?;
        }
        Commands::Deliveries { action } => {
            guard(&ctx, Route::Delivery, &nav)?;
            cmd_deliveries(&ctx, action.unwrap_or(DeliveryAction::List)).await?;
        }
        Commands::Transactions { action } => {
            guard(&ctx, Route::Transactions, &nav)?;
            cmd_transactions(&ctx, action.unwrap_or(TransactionAction::List)).await?;
        }
        Commands::Monthly { year } => {
            guard(&ctx, Route::PreviousMonths, &nav)?;
            cmd_monthly(&ctx, year).await?;
        }
        Commands::Users { action } => {
            guard(&ctx, Route::Users, &nav)?;
            cmd_users(&ctx, action.unwrap_or(UserAction::List)).await?;
        }
    }

    Ok(())
}

fn guard(ctx: &SessionContext, route: Route, nav: &dyn Navigator) -> Result<()> {
    let mut guard = RouteGuard::new(route);
    if guard.check(ctx.store(), nav) == GuardState::Unauthenticated {
        bail!("{} requires a session", route);
    }
    Ok(())
}

fn role_label(is_admin: bool) -> &'static str {
    if is_admin {
        "admin"
    } else {
        "user"
    }
}

fn active_label(is_active: bool) -> &'static str {
    if is_active {
        "active"
    } else {
        "inactive"
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

/// Turns a page's error banner into the command's error.
fn banner(error: Option<String>, fallback: &str) -> anyhow::Error {
    anyhow::anyhow!(error.unwrap_or_else(|| fallback.to_string()))
}

async fn cmd_dashboard(ctx: &SessionContext) -> Result<()> {
    let mut page = DashboardPage::new(ctx.clone());
    if page.mount().await.is_err() {
        return Err(banner(page.error().map(str::to_string), "Failed to load dashboard data"));
    }
    let Some(data) = page.data() else {
        return Ok(());
    };

    let stats = &data.stats;
    println!("Monthly profit:   {}", format_currency(stats.monthly_profit));
    println!("Monthly revenue:  {}", format_currency(stats.monthly_revenue));
    println!("Overall capital:  {}", format_currency(stats.overall_capital));
    println!("Total clients:    {}", stats.total_clients);
    println!("Ongoing orders:   {}", stats.ongoing_orders);

    println!("\nRecent orders:");
    for ((id, profit), order) in page.recent_profits().into_iter().zip(&data.recent_orders) {
        println!(
            "  #{:<5} {:<30} x{:<3} {:>10}  profit {:>10}",
            id,
            order.order_name,
            order.quantity,
            format_amount(order.customer_price),
            format_amount(profit)
        );
    }

    println!("\nRecent clients:");
    for client in &data.recent_clients {
        println!("  #{:<5} {:<25} {:<15} {}", client.id, client.name, client.phone, client.location);
    }
    Ok(())
}

async fn cmd_clients(ctx: &SessionContext, action: ClientAction) -> Result<()> {
    let page = match &action {
        ClientAction::List { search: Some(term) } => ClientsPage::searching(ctx.clone(), term),
        _ => ClientsPage::new(ctx.clone()),
    };
    page.mount().await;

    match action {
        ClientAction::List { .. } => {}
        ClientAction::Add {
            name,
            phone,
            location,
            email,
            notes,
        } => {
            let form = ClientCreate {
                name,
                email,
                phone,
                location,
                notes,
            };
            if page.save(None, &form).await.is_err() {
                return Err(banner(page.list().error().await, "Failed to create client"));
            }
        }
        ClientAction::Delete { id } => {
            if page.delete(id).await.is_err() {
                return Err(banner(page.list().error().await, "Failed to delete client"));
            }
        }
        ClientAction::Notes { id, notes } => {
            if page.save_notes(id, &notes).await.is_err() {
                return Err(banner(page.list().error().await, "Failed to save notes"));
            }
        }
    }

    if let Some(error) = page.list().error().await {
        bail!(error);
    }
    for client in page.clients().await {
        println!(
            "#{:<5} {:<25} {:<15} {:<25} {}",
            client.id,
            client.name,
            client.phone,
            client.location,
            or_dash(client.email.as_deref())
        );
    }
    Ok(())
}

async fn cmd_orders(ctx: &SessionContext, nav: &dyn Navigator, action: OrderAction) -> Result<()> {
    let (kind, route) = match &action {
        OrderAction::Completed => (OrderBoardKind::Completed, Route::OrderCompleted),
        OrderAction::Add { .. } => (OrderBoardKind::Pending, Route::AddOrder),
        _ => (OrderBoardKind::Pending, Route::OrderPending),
    };
    guard(ctx, route, nav)?;

    let board = OrderBoard::new(ctx.clone(), kind);
    let result = match action {
        OrderAction::Add {
            client_id,
            name,
            link,
            quantity,
            cost,
            price,
            taxes,
            assign_to,
        } => {
            let form = OrderCreate {
                client_id,
                order_name: name,
                order_link: link,
                quantity,
                cost,
                customer_price: price,
                taxes,
                assigned_to: assign_to,
            };
            return cmd_add_order(ctx, nav, &board, &form).await;
        }
        OrderAction::Complete { id } => {
            board.mount().await;
            board.mark_complete(id).await.map_err(|_| "Failed to update order")
        }
        OrderAction::Delete { id } => {
            board.mount().await;
            board.delete(id).await.map_err(|_| "Failed to delete order")
        }
        OrderAction::Pending | OrderAction::Completed => {
            board.mount().await;
            Ok(())
        }
    };
    if let Err(fallback) = result {
        return Err(banner(board.list().error().await, fallback));
    }
    print_board(&board).await
}

/// Submits the form and, like the web form, lands on the pending board.
async fn cmd_add_order(
    ctx: &SessionContext,
    nav: &dyn Navigator,
    board: &OrderBoard,
    form: &OrderCreate,
) -> Result<()> {
    let mut page = AddOrderPage::new(ctx.clone());
    page.mount().await;
    println!("Expected profit: {}", format_amount(AddOrderPage::preview_profit(form)));
    if page.submit(form, nav).await.is_err() {
        return Err(banner(page.error().map(str::to_string), "Failed to create order"));
    }
    board.mount().await;
    print_board(board).await
}

async fn print_board(board: &OrderBoard) -> Result<()> {
    if let Some(error) = board.list().error().await {
        bail!(error);
    }
    let show_creator = board.list().is_admin().await;
    for row in board.rows().await {
        let order = &row.order;
        print!(
            "#{:<5} {:<28} {:<20} x{:<3} cost {:>9} price {:>9} taxes {:>8} profit {:>9}",
            order.id,
            order.order_name,
            or_dash(order.client_name.as_deref()),
            order.quantity,
            format_amount(order.cost),
            format_amount(order.customer_price),
            format_amount(order.taxes),
            format_amount(row.profit)
        );
        if show_creator {
            print!("  by {}", or_dash(order.created_by_username.as_deref()));
        }
        println!();
    }

    let totals = board.totals().await;
    match board.kind() {
        OrderBoardKind::Pending => println!(
            "Total value: {}  Total items: {}",
            format_currency(totals.revenue),
            totals.quantity
        ),
        OrderBoardKind::Completed => println!(
            "Total revenue: {}  Total profit: {}",
            format_currency(totals.revenue),
            format_currency(totals.profit)
        ),
    }
    Ok(())
}

async fn cmd_deliveries(ctx: &SessionContext, action: DeliveryAction) -> Result<()> {
    let page = DeliveriesPage::new(ctx.clone());
    page.mount().await;

    let result = match action {
        DeliveryAction::List => (Ok(()), ""),
        DeliveryAction::Add {
            order_id,
            address,
            tracking_number,
            driver_name,
            driver_phone,
            notes,
        } => {
            let delivery_address = match address {
                Some(address) => address,
                None => page
                    .address_for_order(order_id)
                    .await
                    .with_context(|| format!("No address given and order {} has no client location", order_id))?,
            };
            let form = DeliveryCreate {
                order_id,
                delivery_address,
                tracking_number,
                driver_name,
                driver_phone,
                notes,
            };
            (
                page.save(None, &form).await.map(|_| ()),
                "Failed to save delivery. Please try again.",
            )
        }
        DeliveryAction::Status { id, status } => {
            let changes = DeliveryUpdate {
                status: Some(status),
                ..Default::default()
            };
            (page.set_status(id, &changes).await.map(|_| ()), "Failed to update delivery status")
        }
        DeliveryAction::Delete { id } => (page.delete(id).await, "Failed to delete delivery"),
    };
    if let (Err(_), fallback) = result {
        return Err(banner(page.deliveries().error().await, fallback));
    }

    if let Some(error) = page.deliveries().error().await {
        bail!(error);
    }
    let show_creator = page.deliveries().is_admin().await;
    for delivery in page.deliveries().items().await {
        print!(
            "#{:<5} {:<11} {:<25} {:<20} {:<30} tracking {}",
            delivery.id,
            delivery.status.to_string(),
            or_dash(delivery.order_name.as_deref()),
            or_dash(delivery.client_name.as_deref()),
            delivery.delivery_address,
            or_dash(delivery.tracking_number.as_deref())
        );
        if show_creator {
            print!("  by {}", or_dash(delivery.created_by_username.as_deref()));
        }
        println!();
    }
    println!("{} pending order(s) awaiting delivery", page.pending_orders().items().await.len());
    Ok(())
}

async fn cmd_transactions(ctx: &SessionContext, action: TransactionAction) -> Result<()> {
    let page = TransactionsPage::new(ctx.clone());
    page.mount().await;

    let result = match action {
        TransactionAction::List => (Ok(()), ""),
        TransactionAction::Add {
            kind,
            category,
            amount,
            description,
        } => {
            let form = TransactionCreate {
                kind,
                category,
                amount,
                description,
                reference_id: None,
                transaction_date: None,
            };
            (page.create(&form).await.map(|_| ()), "Failed to create transaction")
        }
        TransactionAction::Delete { id } => (page.delete(id).await, "Failed to delete transaction"),
    };
    if let (Err(_), fallback) = result {
        return Err(banner(page.list().error().await, fallback));
    }

    if let Some(error) = page.list().error().await {
        bail!(error);
    }
    for tx in page.list().items().await {
        println!(
            "#{:<5} {} {:<8} {:<14} {:>12}  {}",
            tx.id,
            tx.transaction_date.format("%Y-%m-%d"),
            tx.kind.to_string(),
            tx.category.to_string(),
            format_amount(tx.amount),
            or_dash(tx.description.as_deref())
        );
    }
    let totals = page.totals().await;
    println!(
        "Income {}  Expenses {}  Profit {}",
        format_currency(totals.total_income),
        format_currency(totals.total_expenses),
        format_currency(totals.profit)
    );
    Ok(())
}

async fn cmd_monthly(ctx: &SessionContext, year: Option<i32>) -> Result<()> {
    let current_year = Local::now().year();
    let mut page = PreviousMonthsPage::new(ctx.clone(), current_year);
    let loaded = match year {
        Some(year) if year != current_year => page.select_year(year).await,
        _ => page.mount().await,
    };
    if loaded.is_err() {
        return Err(banner(page.error().map(str::to_string), "Failed to load monthly data"));
    }
    let Some(breakdown) = page.breakdown() else {
        return Ok(());
    };

    println!("{}", page.year());
    println!("{:<6} {:>12} {:>12} {:>12} {:>8}", "Month", "Revenue", "Expenses", "Profit", "Margin");
    for row in &breakdown.rows {
        println!(
            "{:<6} {:>12} {:>12} {:>12} {:>8}",
            row.month,
            format_amount(row.revenue),
            format_amount(row.expenses),
            format_amount(row.profit),
            format_percent(row.margin)
        );
    }
    println!(
        "{:<6} {:>12} {:>12} {:>12} {:>8}",
        "Total",
        format_amount(breakdown.total_revenue),
        format_amount(breakdown.total_expenses),
        format_amount(breakdown.net_profit),
        format_percent(breakdown.overall_margin)
    );
    Ok(())
}

async fn cmd_users(ctx: &SessionContext, action: UserAction) -> Result<()> {
    let page = UsersPage::new(ctx.clone());
    page.mount().await;
    if !page.list().is_admin().await {
        bail!("User management is restricted to admins");
    }

    let result = match action {
        UserAction::List => Ok(()),
        UserAction::Add {
            username,
            email,
            password,
            admin,
        } => {
            let form = UserCreate {
                username,
                email,
                password,
                role: Some(if admin { UserRole::Admin } else { UserRole::User }),
                is_active: Some(true),
            };
            page.create(&form).await.map(|_| ())
        }
        UserAction::Update {
            id,
            username,
            email,
            admin,
        } => {
            let changes = UserUpdate {
                username,
                email,
                role: admin.map(|admin| if admin { UserRole::Admin } else { UserRole::User }),
                is_active: None,
            };
            page.update(id, &changes).await.map(|_| ())
        }
        UserAction::Deactivate { id } => page.deactivate(id).await,
        UserAction::Activate { id } => page.activate(id).await,
        UserAction::ResetPassword { id, new_password } => page.reset_password(id, &new_password).await,
    };
    if result.is_err() {
        return Err(banner(page.list().error().await, "Failed to update user"));
    }

    if let Some(error) = page.list().error().await {
        bail!(error);
    }
    for user in page.users().await {
        println!(
            "#{:<5} {:<20} {:<30} {:<6} {}",
            user.id,
            user.username,
            user.email,
            user.role.to_string(),
            active_label(user.is_active)
        );
    }
    Ok(())
}
