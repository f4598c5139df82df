//! # Commands Module
//!
//! The operations a storefront session exposes, plus the parser that turns
//! one line of shopper input into a [`Command`].
//!
//! ## Command Organization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Commands                               │
//! │                                                                         │
//! │  product.rs                          cart.rs                            │
//! │  ───────────                         ───────                            │
//! │  • list_products                     • get_cart                         │
//! │  • search_products                   • add_to_cart                      │
//! │  • get_product                       • update_cart_item                 │
//! │                                      • remove_from_cart                 │
//! │                                      • clear_cart                       │
//! │                                      • checkout                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command word has a Dutch alias (`zoek`, `bestel`, `afrekenen`, ...).

pub mod cart;
pub mod product;

use std::str::FromStr;

use crate::error::{ApiError, ErrorCode};

/// One parsed line of shopper input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List { product_type: Option<String> },
    Search { query: String },
    Show { reference: String },
    Add { reference: String, quantity: Option<String> },
    Set { product_id: String, quantity: String },
    Remove { product_id: String },
    Cart,
    Clear,
    Checkout,
    Quit,
}

impl FromStr for Command {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ApiError::validation("Typ een opdracht, of 'help'"));
        };
        let args: Vec<&str> = words.collect();

        let command = match verb.to_lowercase().as_str() {
            "help" | "hulp" | "?" => Command::Help,
            "list" | "assortiment" => Command::List {
                product_type: args.first().map(|t| t.to_lowercase()),
            },
            "search" | "zoek" => Command::Search {
                query: args.join(" "),
            },
            "show" | "toon" => Command::Show {
                reference: required(&args, 0, "show <product>")?,
            },
            "add" | "bestel" => Command::Add {
                reference: required(&args, 0, "add <product> [aantal]")?,
                quantity: args.get(1).map(|q| q.to_string()),
            },
            "set" | "aantal" => Command::Set {
                product_id: required(&args, 0, "set <product> <aantal>")?,
                quantity: required(&args, 1, "set <product> <aantal>")?,
            },
            "remove" | "verwijder" => Command::Remove {
                product_id: required(&args, 0, "remove <product>")?,
            },
            "cart" | "winkelwagen" => Command::Cart,
            "clear" | "leeg" => Command::Clear,
            "checkout" | "afrekenen" => Command::Checkout,
            "quit" | "exit" | "stop" => Command::Quit,
            other => {
                return Err(ApiError::new(
                    ErrorCode::UnknownCommand,
                    format!("Onbekende opdracht: {}. Typ 'help' voor een overzicht.", other),
                ))
            }
        };

        Ok(command)
    }
}

fn required(args: &[&str], index: usize, usage: &str) -> Result<String, ApiError> {
    args.get(index)
        .map(|a| a.to_string())
        .ok_or_else(|| ApiError::validation(format!("Gebruik: {}", usage)))
}

/// Overview printed by `help`.
pub const HELP_TEXT: &str = "\
Opdrachten:
  list [type]              assortiment tonen (fiets, accessoire, onderdeel)
  search <zoekterm>        producten zoeken
  show <product>           productpagina tonen
  add <product> [aantal]   in winkelwagen (standaard 1)
  set <product> <aantal>   aantal wijzigen (0 verwijdert)
  remove <product>         uit winkelwagen verwijderen
  cart                     winkelwagen tonen
  clear                    winkelwagen legen
  checkout                 bestelling afronden
  quit                     afsluiten";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("help".parse::<Command>().unwrap(), Command::Help);
        assert_eq!(
            "LIST Fiets".parse::<Command>().unwrap(),
            Command::List {
                product_type: Some("fiets".to_string())
            }
        );
        assert_eq!(
            "zoek  dubbele   tas ".parse::<Command>().unwrap(),
            Command::Search {
                query: "dubbele tas".to_string()
            }
        );
        assert_eq!(
            "bestel acc-001 3".parse::<Command>().unwrap(),
            Command::Add {
                reference: "acc-001".to_string(),
                quantity: Some("3".to_string())
            }
        );
        assert_eq!(
            "add acc-001".parse::<Command>().unwrap(),
            Command::Add {
                reference: "acc-001".to_string(),
                quantity: None
            }
        );
        assert_eq!("afrekenen".parse::<Command>().unwrap(), Command::Checkout);
    }

    #[test]
    fn test_missing_arguments() {
        let err = "set acc-001".parse::<Command>().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("set <product> <aantal>"));

        assert!("remove".parse::<Command>().is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = "koop fiets".parse::<Command>().unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCommand);
    }
}
