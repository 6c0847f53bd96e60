use jetton_holder_service::{db::connection, report};

use dotenv::dotenv;
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:jetton_holders.db".to_string());
    // Token price is an externally supplied constant, not a live feed.
    let price = env::var("TOKEN_PRICE_USD").unwrap_or_else(|_| "0.000061".to_string());
    let price = Decimal::from_str(&price)?;

    let pool = connection::establish_connection(&database_url).await?;

    let cohorts = report::build_cohorts(&pool, price).await?;
    println!("{}", report::render_cohorts(&cohorts));

    Ok(())
}
