//! # pancito
//!
//! Command line front-end of the ledger: take and close orders, keep the menu and the
//! frequent customers, inspect tables and statistics, and move backups in and out of
//! the data directory.
//!
//! ```bash
//! pancito order add --table 2 --item 7:2 --item 9:1 --customer Ana
//! pancito order complete 12
//! RUST_LOG=info pancito --data-dir ./pancito-data stats week
//! pancito export --output respaldo.json
//! pbpaste | pancito import -
//! ```

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use pancito::config::LedgerConfig;
use pancito::lifecycle::Ledger;
use pancito::model::{
    DishCategory, DishCreate, DishId, DishUpdate, FrequentCustomerId, NewOrder, Order, OrderId,
    OrderItem, TableId, TableStatus,
};
use pancito::stats::{format_price, StatsPeriod};
use resource_actor::tracing::setup_tracing;
use resource_actor::FileStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "pancito", about = "Pancito de Vida order and table ledger")]
struct Cli {
    /// Directory holding the ledger's JSON files
    #[arg(long, env = "PANCITO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show every table and its status
    Tables,
    /// Show the menu
    Menu {
        /// Only one section: Desayuno, Almuerzo, Bebestibles or Otros
        #[arg(long)]
        category: Option<DishCategory>,
    },
    /// Set a table's status by hand (e.g. Reservada)
    SetTable { table: u32, status: TableStatus },
    /// Take, close and charge orders
    #[command(subcommand)]
    Order(OrderCommand),
    /// Edit the menu
    #[command(subcommand)]
    Dish(DishCommand),
    /// Register or remove frequent customers
    #[command(subcommand)]
    Customer(CustomerCommand),
    /// Show active orders
    Orders {
        /// Only orders at this table
        #[arg(long, conflicts_with = "free_zone")]
        table: Option<u32>,
        /// Only free-zone orders
        #[arg(long)]
        free_zone: bool,
    },
    /// Sales statistics: today, week, month or year
    Stats { period: StatsPeriod },
    /// List frequent customers
    Customers,
    /// Balance of a frequent customer
    Account { name: String },
    /// Write a backup file
    Export {
        /// Defaults to PancitoDeVida_Respaldo_<date>.json in the current directory
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Restore a backup from a file, or from stdin with `-`
    Import { path: PathBuf },
    /// Load the house menu into an empty menu
    Seed,
}

#[derive(Debug, Subcommand)]
enum OrderCommand {
    /// Place an order at a table, or in the free zone when no table is given
    Add(NewOrderArgs),
    /// Mark an order as completed and free its table
    Complete { id: u32 },
    /// Remove an active order
    Cancel { id: u32 },
    /// Set whether an order has been paid
    Paid {
        id: u32,
        #[arg(action = clap::ArgAction::Set)]
        paid: bool,
    },
}

#[derive(Debug, Args)]
struct NewOrderArgs {
    #[arg(long)]
    table: Option<u32>,
    /// One line of the order as DISH_ID:QTY; repeat for more lines
    #[arg(long = "item", value_name = "DISH_ID:QTY", value_parser = parse_item, required = true)]
    items: Vec<(u32, u32)>,
    /// Frequent customer the order is charged to
    #[arg(long)]
    customer: Option<String>,
}

#[derive(Debug, Subcommand)]
enum DishCommand {
    Add {
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        category: DishCategory,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Change the given fields of a dish
    Update {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        category: Option<DishCategory>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete { id: u32 },
}

#[derive(Debug, Subcommand)]
enum CustomerCommand {
    Add { name: String, local: String },
    /// Change where a customer works
    Local { id: u32, local: String },
    Delete { id: u32 },
}

/// Parses `7:2` into dish 7, quantity 2.
fn parse_item(raw: &str) -> Result<(u32, u32), String> {
    let (dish, quantity) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected DISH_ID:QTY, got '{raw}'"))?;
    let dish = dish.trim().parse().map_err(|_| format!("invalid dish id '{dish}'"))?;
    let quantity = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity '{quantity}'"))?;
    Ok((dish, quantity))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let cli = Cli::parse();
    let mut config = LedgerConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let store = FileStore::open(&config.data_dir)
        .await
        .with_context(|| format!("opening data directory {}", config.data_dir.display()))?;
    let ledger = Ledger::open(Arc::new(store), &config).await?;
    info!(data_dir = %config.data_dir.display(), "Ledger ready");

    let result = run(&ledger, cli.command).await;
    ledger.shutdown().await?;
    result
}

async fn run(ledger: &Ledger, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Tables => {
            for table in ledger.tables().await? {
                let active = table.active_orders().count();
                println!("Mesa {:>2}  {:<10}  {active} pedido(s) activo(s)", table.id.0, table.status);
            }
        }
        Command::Menu { category } => {
            let dishes = match category {
                Some(category) => ledger.dishes_by_category(category).await?,
                None => ledger.dishes().await?,
            };
            for dish in dishes {
                println!(
                    "{:>3}  {:<12} {:<28} ${}",
                    dish.id.0,
                    dish.category,
                    dish.name,
                    format_price(dish.price)
                );
            }
        }
        Command::SetTable { table, status } => {
            let table = ledger.update_table_status(TableId(table), status).await?;
            println!("Mesa {} {}", table.id.0, table.status);
        }
        Command::Order(command) => run_order(ledger, command).await?,
        Command::Dish(command) => run_dish(ledger, command).await?,
        Command::Customer(command) => run_customer(ledger, command).await?,
        Command::Orders { table, free_zone } => {
            let orders = if free_zone {
                ledger.orders_by_table(None).await?
            } else if let Some(table) = table {
                ledger.orders_by_table(Some(TableId(table))).await?
            } else {
                ledger
                    .orders()
                    .await?
                    .into_iter()
                    .filter(Order::is_active)
                    .collect()
            };
            for order in &orders {
                print_order(order);
            }
        }
        Command::Stats { period } => {
            let stats = ledger.stats(period).await?;
            println!("{}", stats.label);
            println!("Ventas: ${}  Pedidos: {}", format_price(stats.total_sales), stats.orders_count);
            for (rank, sales) in stats.top_dishes.iter().enumerate() {
                println!("  {}. {} x{}", rank + 1, sales.dish.name, sales.quantity);
            }
        }
        Command::Customers => {
            for customer in ledger.frequent_customers().await? {
                println!("{:>3}  {:<24} {}", customer.id.0, customer.name, customer.local);
            }
        }
        Command::Account { name } => {
            let account = ledger.customer_account(&name).await?;
            println!("{}", account.name);
            println!(
                "Pedidos: {}  Sin pagar: {}  Debe: ${}  Total histórico: ${}",
                account.order_count,
                account.unpaid_orders,
                format_price(account.amount_owed),
                format_price(account.lifetime_total)
            );
            for order in &account.pending_orders {
                print_order(order);
            }
        }
        Command::Export { output } => {
            let backup = ledger.export_backup().await?;
            let path = output.unwrap_or_else(|| PathBuf::from(backup.file_name()));
            tokio::fs::write(&path, backup.to_json()?)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            println!("{}", backup.summary());
            println!("\nGuardado en {}", path.display());
        }
        Command::Import { path } => {
            let text = if path.as_os_str() == "-" {
                let mut text = String::new();
                tokio::io::stdin().read_to_string(&mut text).await?;
                text
            } else {
                tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?
            };
            let backup = ledger.import_backup(&text).await?;
            println!("{}", backup.summary());
        }
        Command::Seed => {
            let added = ledger.seed_sample_menu().await?;
            println!("{added} plato(s) agregados");
        }
    }
    Ok(())
}

async fn run_order(ledger: &Ledger, command: OrderCommand) -> anyhow::Result<()> {
    match command {
        OrderCommand::Add(args) => {
            let menu = ledger.dishes().await?;
            let items = args
                .items
                .into_iter()
                .map(|(dish, quantity)| {
                    menu.iter()
                        .find(|d| d.id == DishId(dish))
                        .map(|d| OrderItem::new(d.clone(), quantity))
                        .ok_or_else(|| anyhow!("no dish with id {dish} on the menu"))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            let mut order = match args.table {
                Some(table) => NewOrder::at_table(TableId(table), items),
                None => NewOrder::free_zone(items),
            };
            if let Some(name) = args.customer {
                order = order.for_customer(name);
            }
            let id = ledger.add_order(order).await?;
            print_order(&ledger.order(id).await?);
        }
        OrderCommand::Complete { id } => {
            let order = ledger.complete_order(OrderId(id)).await?;
            println!("{} completado  ${}", order.id, format_price(order.total));
        }
        OrderCommand::Cancel { id } => {
            ledger.cancel_order(OrderId(id)).await?;
            println!("{} cancelado", OrderId(id));
        }
        OrderCommand::Paid { id, paid } => {
            print_order(&ledger.update_order_payment_status(OrderId(id), paid).await?);
        }
    }
    Ok(())
}

async fn run_dish(ledger: &Ledger, command: DishCommand) -> anyhow::Result<()> {
    match command {
        DishCommand::Add { name, price, category, description } => {
            let id = ledger
                .add_dish(DishCreate { name, description, price, category })
                .await?;
            println!("Plato {} agregado", id.0);
        }
        DishCommand::Update { id, name, price, category, description } => {
            let dish = ledger
                .update_dish(DishId(id), DishUpdate { name, description, price, category })
                .await?;
            println!("{:>3}  {:<12} {:<28} ${}", dish.id.0, dish.category, dish.name, format_price(dish.price));
        }
        DishCommand::Delete { id } => {
            ledger.delete_dish(DishId(id)).await?;
            println!("Plato {id} eliminado");
        }
    }
    Ok(())
}

async fn run_customer(ledger: &Ledger, command: CustomerCommand) -> anyhow::Result<()> {
    match command {
        CustomerCommand::Add { name, local } => {
            let id = ledger.add_frequent_customer(&name, &local).await?;
            println!("Cliente {} registrado: {}", id.0, name.trim());
        }
        CustomerCommand::Local { id, local } => {
            let customer = ledger
                .update_frequent_customer(FrequentCustomerId(id), &local)
                .await?;
            println!("{:>3}  {:<24} {}", customer.id.0, customer.name, customer.local);
        }
        CustomerCommand::Delete { id } => {
            ledger.delete_frequent_customer(FrequentCustomerId(id)).await?;
            println!("Cliente {id} eliminado");
        }
    }
    Ok(())
}

fn print_order(order: &Order) {
    let place = order
        .table_id
        .map_or_else(|| "Zona libre".to_string(), |t| format!("Mesa {}", t.0));
    let customer = order.customer_name.as_deref().unwrap_or("-");
    let paid = if order.is_paid() { "pagado" } else { "debe" };
    println!(
        "{}  {:<10}  {:<16}  ${:>8}  {paid}",
        order.id,
        place,
        customer,
        format_price(order.total)
    );
    for item in &order.items {
        println!("      {} x{}", item.dish.name, item.quantity);
    }
}
