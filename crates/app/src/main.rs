//! Bounce back-office CLI

use std::process;

use bounce::voucher::VoucherDiscount;
use clap::{Args, Parser, Subcommand, ValueEnum};
use jiff::{civil::Date, tz::TimeZone};
use rust_decimal::Decimal;

use bounce_app::{
    database::{self, Db},
    domain::vouchers::{PgVouchersService, VouchersService, models::NewVoucher},
};

#[derive(Debug, Parser)]
#[command(name = "bounce-app", about = "Bounce back-office CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Voucher(VoucherCommand),
}

#[derive(Debug, Args)]
struct VoucherCommand {
    #[command(subcommand)]
    command: VoucherSubcommand,
}

#[derive(Debug, Subcommand)]
enum VoucherSubcommand {
    Create(CreateVoucherArgs),
    List(ListVouchersArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DiscountKind {
    Percentage,
    Fixed,
}

#[derive(Debug, Args)]
struct CreateVoucherArgs {
    /// Voucher code, as guests will type it
    #[arg(long)]
    code: String,

    /// Discount type
    #[arg(long, value_enum)]
    discount_type: DiscountKind,

    /// Percentage points or flat rupee amount, per the discount type
    #[arg(long)]
    discount_value: Decimal,

    /// Last day the voucher is valid (inclusive), ISO date
    #[arg(long)]
    expiry: Option<Date>,

    /// Maximum number of redemptions
    #[arg(long)]
    usage_limit: Option<u32>,

    /// Minimum order subtotal for the voucher to apply
    #[arg(long)]
    min_order: Option<Decimal>,

    /// Create the voucher deactivated
    #[arg(long)]
    inactive: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct ListVouchersArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Voucher(VoucherCommand {
            command: VoucherSubcommand::Create(args),
        }) => create_voucher(args).await,
        Commands::Voucher(VoucherCommand {
            command: VoucherSubcommand::List(args),
        }) => list_vouchers(args).await,
    }
}

async fn connect_service(database_url: &str) -> Result<PgVouchersService, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(PgVouchersService::new(Db::new(pool)))
}

async fn create_voucher(args: CreateVoucherArgs) -> Result<(), String> {
    let code = args.code.trim().to_uppercase();

    if code.is_empty() {
        return Err("voucher code cannot be empty".to_string());
    }

    let discount = match args.discount_type {
        DiscountKind::Percentage => VoucherDiscount::PercentageOff {
            percentage: args.discount_value,
        },
        DiscountKind::Fixed => VoucherDiscount::AmountOff {
            amount: args.discount_value,
        },
    };

    // Expiry is inclusive of the whole last day.
    let expiry_date = args
        .expiry
        .map(|date| {
            date.at(23, 59, 59, 0)
                .to_zoned(TimeZone::UTC)
                .map(|zoned| zoned.timestamp())
        })
        .transpose()
        .map_err(|error| format!("invalid expiry date: {error}"))?;

    let service = connect_service(&args.database_url).await?;

    let record = service
        .create_voucher(NewVoucher {
            code,
            discount,
            is_active: !args.inactive,
            expiry_date,
            usage_limit: args.usage_limit,
            min_order_amount: args.min_order,
        })
        .await
        .map_err(|error| format!("failed to create voucher: {error}"))?;

    println!("voucher_id: {}", record.id);
    println!("code: {}", record.code);
    println!(
        "discount: {} {}",
        record.voucher.discount.to_str(),
        record.voucher.discount.value()
    );

    Ok(())
}

async fn list_vouchers(args: ListVouchersArgs) -> Result<(), String> {
    let service = connect_service(&args.database_url).await?;

    let records = service
        .list_vouchers()
        .await
        .map_err(|error| format!("failed to list vouchers: {error}"))?;

    for record in records {
        println!(
            "{}  {} {}  active={}  used={}/{}",
            record.code,
            record.voucher.discount.to_str(),
            record.voucher.discount.value(),
            record.voucher.is_active,
            record.voucher.used_count,
            record
                .voucher
                .usage_limit
                .map_or_else(|| "∞".to_string(), |limit| limit.to_string()),
        );
    }

    Ok(())
}
