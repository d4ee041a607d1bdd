//! `datenight ideas`: curated suggestions and the known form options.

use datenight_core::catalog;
use datenight_core::idea::options::{BUDGETS, FormOption, MOODS, OCCASIONS, TIMES_OF_DAY};

pub fn run_ideas(show_options: bool) {
    println!("Curated date ideas:");
    println!();
    for suggestion in catalog::curated() {
        println!("  {}", suggestion.title);
        println!("    {}", suggestion.description);
    }

    if show_options {
        println!();
        print_options("Moods (--mood)", MOODS);
        print_options("Budgets (--budget)", BUDGETS);
        print_options("Times of day (--time-of-day)", TIMES_OF_DAY);
        print_options("Occasions (--occasion)", OCCASIONS);
    }
}

fn print_options(heading: &str, options: &[FormOption]) {
    let width = options.iter().map(|o| o.value.len()).max().unwrap_or(0);
    println!("{heading}:");
    for option in options {
        println!("  {:<width$}  {}", option.value, option.label);
    }
    println!();
}
