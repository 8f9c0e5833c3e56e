//! Interactive CLI for ledger lookups.
//!
//! Reads one command per line and prints the result.
use crate::*;
use billing_core::Settings;
use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use tokio_postgres::Client;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub enum Query {
    #[command(about = "Show the partition currently serving lookups", alias = "lt")]
    Latest,
    #[command(about = "List the columns of the latest partition", alias = "cols")]
    Columns,
    #[command(about = "Find the debt of an account")]
    Debt {
        #[arg(required = true)]
        account: String,
    },
    #[command(about = "Find the full billing record of an account")]
    Info {
        #[arg(required = true)]
        account: String,
    },
}

pub struct CLI<S = Arc<Client>>(Ledger<S>);

impl<S> From<Ledger<S>> for CLI<S> {
    fn from(ledger: Ledger<S>) -> Self {
        Self(ledger)
    }
}

impl CLI {
    pub async fn run(settings: &Settings) -> anyhow::Result<()> {
        log::info!("entering ledger");
        let cli = Self(Ledger::connect(settings).await?);
        loop {
            print!("> ");
            let ref mut input = String::new();
            std::io::stdout().flush()?;
            if std::io::stdin().read_line(input)? == 0 {
                break;
            }
            match input.trim() {
                "" => continue,
                "quit" => break,
                "exit" => break,
                _ => match cli.handle(input).await {
                    Err(e) => eprintln!("{}", e),
                    Ok(output) => println!("{}", output),
                },
            }
        }
        Ok(())
    }
}

impl<S: Store> CLI<S> {
    async fn handle(&self, input: &str) -> Result<String, Box<dyn std::error::Error>> {
        match Query::try_parse_from(std::iter::once("> ").chain(input.split_whitespace()))? {
            Query::Latest => Ok(match self.0.resolve_latest_table().await? {
                Some(table) => format!("{} (suffix {})", table, table.suffix()),
                None => format!("no suitable table in schema {}", self.0.schema()),
            }),
            Query::Columns => {
                let table = self.0.resolve_latest_table().await?.ok_or_else(|| {
                    QueryError::NoSuitableTable {
                        schema: self.0.schema().name().to_string(),
                    }
                })?;
                Ok(self
                    .0
                    .store()
                    .columns(&table)
                    .await?
                    .into_iter()
                    .collect::<Vec<String>>()
                    .join("\n"))
            }
            Query::Debt { account } => Ok(self.0.get_debt(&account).await?),
            Query::Info { account } => Ok(serde_json::to_string_pretty(
                &self.0.get_account_info(&account).await?,
            )?),
        }
    }
}
