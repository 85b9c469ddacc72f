//! Plain-text presentation of the engine's views.
//!
//! The core hands over plain data; everything here is stdout binding.
//! Empty results get their dedicated empty-state lines rather than being
//! treated as errors.

use crate::chat::{ChatReply, MatchTier};
use crate::links;
use crate::pipeline::{PreviewView, PulseView, ShopView};

const RULE: &str = "─────────────────────────────────────────────";

pub fn shop(view: &ShopView, whatsapp: &str) {
    if view.listings.is_empty() {
        println!("No products found.");
        return;
    }

    for listing in &view.listings {
        println!("{}", RULE);
        if listing.badge.is_empty() {
            println!("  {}", listing.name);
        } else {
            println!("  {}  [{}]", listing.name, listing.badge);
        }
        println!("  Origin    : {}", listing.origin);
        println!("  Packaging : {}", listing.packaging);
        println!("  Price     : {}", listing.price.display);
        println!("  Stock     : {}", listing.stock);
        println!(
            "  Quote     : {}",
            links::inquiry_link(whatsapp, &listing.name, &listing.price.display)
        );
    }
    println!("{}", RULE);
}

pub fn pulse(view: &PulseView) {
    println!("{}", RULE);
    println!("  Grains Hub — Market Pulse");
    println!("{}", RULE);

    if !view.ticker.is_empty() {
        println!("  {}", view.ticker);
        println!();
    }

    if view.rows.is_empty() {
        println!("  No data for this origin.");
    } else {
        for row in &view.rows {
            println!(
                "  {:<24} {:<12} {:<32} {:>4} {:>4}%   {}",
                row.listing.name,
                row.listing.origin,
                row.listing.price.display,
                row.trend.direction,
                row.trend.change_pct.abs(),
                row.supplier,
            );
        }
    }

    println!();
    println!("  Market mood : {}", view.mood);
    println!("  Last updated: {}", view.last_updated);
    println!("{}", RULE);
}

pub fn preview(view: &PreviewView) {
    if view.listings.is_empty() {
        println!("Stock will be back in a second — refreshing…");
        return;
    }

    for listing in &view.listings {
        println!(
            "  {:<24} {:<32} {:<16} ({})",
            listing.name, listing.price.display, listing.stock, listing.image_ref
        );
    }
}

pub fn chat(reply: &ChatReply, suggestions: &[&str]) {
    if !suggestions.is_empty() {
        println!("Related: {}", suggestions.join(" • "));
        println!();
    }

    match reply {
        ChatReply::Match {
            tier,
            name,
            price,
            stock,
            link,
        } => {
            match tier {
                MatchTier::Keyword => println!("Live stock match"),
                MatchTier::FuzzyScan => println!("Matched via fuzzy scan"),
            }
            println!("{} → {}", name, price);
            println!("Stock: {}", stock);
            println!("Book via WhatsApp: {}", link);
        }
        ChatReply::Remote { reply } => println!("{}", reply),
        ChatReply::Generic { query, link } => {
            println!("Yes, {} is available today!", query);
            println!("WhatsApp: {}", link);
        }
    }
}
