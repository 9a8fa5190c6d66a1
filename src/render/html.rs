use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

use crate::board::{BoardStatus, BoardView};
use crate::models::{Offer, DISCLAIMER};
use crate::parsers::ImageLoadState;

/// Swaps a broken image to its `data-fallback` once, otherwise hides it.
const IMAGE_ONERROR: &str = "var f=this.getAttribute('data-fallback');\
if(f&&f!==this.getAttribute('src')&&!this.dataset.fellBack){\
this.dataset.fellBack='1';this.src=f;this.classList.add('is-fallback');}\
else{this.onerror=null;this.style.display='none';}";

/// Static page for the given boards. Cell text is always escaped; images
/// carry their logo fallback in `data-fallback` and switch to it at most once.
pub fn render_html(views: &[BoardView]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Non Payment Offers</title></head>\n<body>\n");
    out.push_str("<div class=\"top-subtitle\">Non Payment Offers</div>\n");

    for view in views {
        out.push_str("<section class=\"offer-group\">\n");
        let _ = writeln!(out, "<h2 class=\"center-title\">{}</h2>", encode_text(&view.label));

        if let Some(message) = view.message() {
            let class = match view.status {
                BoardStatus::Loading => "center-text",
                _ => "center-text error",
            };
            let _ = writeln!(out, "<p class=\"{}\">{}</p>", class, encode_text(&message));
        }

        for group in &view.groups {
            out.push_str("<div class=\"source-group\">\n");
            let _ = writeln!(out, "<div class=\"source-heading\">{}</div>", encode_text(&group.heading()));
            out.push_str("<div class=\"offer-row\">\n");
            for offer in &group.offers {
                write_card(&mut out, offer);
            }
            out.push_str("</div>\n</div>\n");
        }
        out.push_str("</section>\n");
    }

    let _ = writeln!(
        out,
        "<section class=\"disclaimer\"><h3>Disclaimer</h3><p>{}</p></section>",
        encode_text(DISCLAIMER)
    );
    out.push_str("</body>\n</html>\n");
    out
}

fn write_card(out: &mut String, offer: &Offer) {
    out.push_str("<div class=\"offer-card\">\n");

    let image = ImageLoadState::new(&offer.image);
    if let Some(src) = image.current() {
        let class = if offer.image.is_fallback { "offer-img is-fallback" } else { "offer-img" };
        let _ = writeln!(
            out,
            "<img class=\"{}\" src=\"{}\" data-fallback=\"{}\" alt=\"{}\" loading=\"lazy\" onerror=\"{}\">",
            class,
            encode_double_quoted_attribute(src),
            encode_double_quoted_attribute(image.pending_fallback().unwrap_or_default()),
            encode_double_quoted_attribute(&offer.title),
            encode_double_quoted_attribute(IMAGE_ONERROR),
        );
    }

    let _ = writeln!(out, "<h3 class=\"offer-title\">{}</h3>", encode_text(&offer.title));

    if let Some(coupon) = &offer.coupon {
        let _ = writeln!(out, "<div class=\"coupon-row\"><code class=\"coupon-code\">{}</code></div>", encode_text(coupon));
    }
    if let Some(description) = &offer.description {
        let _ = writeln!(out, "<p class=\"offer-desc\">{}</p>", encode_text(description));
    }
    if let Some(terms) = &offer.terms {
        let _ = writeln!(
            out,
            "<p class=\"offer-desc terms\"><strong>Terms and conditions:</strong> {}</p>",
            encode_text(terms)
        );
    }
    if let Some(url) = offer.link.url() {
        let _ = writeln!(
            out,
            "<a class=\"btn btn-full\" href=\"{}\" target=\"_blank\" rel=\"noopener\">View Offer</a>",
            encode_double_quoted_attribute(url)
        );
    }

    out.push_str("</div>\n");
}
