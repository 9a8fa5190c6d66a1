use std::fmt::Write;

use crate::board::BoardView;
use crate::models::{Offer, DISCLAIMER};

pub fn render_text(views: &[BoardView]) -> String {
    let mut out = String::new();

    for view in views {
        let _ = writeln!(out, "== {} ==", view.label);
        if let Some(loaded_at) = view.loaded_at {
            let _ = writeln!(out, "Loaded at {}", loaded_at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        if let Some(message) = view.message() {
            let _ = writeln!(out, "{}", message);
        }

        for group in &view.groups {
            let _ = writeln!(out, "\n-- {} --", group.heading());
            for offer in &group.offers {
                write_offer(&mut out, offer);
            }
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Disclaimer: {}", DISCLAIMER);
    out
}

fn write_offer(out: &mut String, offer: &Offer) {
    let _ = writeln!(out, "* {}", offer.title);
    if let Some(coupon) = &offer.coupon {
        let _ = writeln!(out, "    Coupon: {}", coupon);
    }
    if let Some(description) = &offer.description {
        let _ = writeln!(out, "    {}", description);
    }
    if let Some(terms) = &offer.terms {
        let _ = writeln!(out, "    Terms and conditions: {}", terms);
    }
    if offer.image.has_image() {
        let marker = if offer.image.is_fallback { " (logo)" } else { "" };
        let _ = writeln!(out, "    Image: {}{}", offer.image.display_src, marker);
    }
    if let Some(url) = offer.link.url() {
        let _ = writeln!(out, "    View Offer: {}", url);
    }
}
