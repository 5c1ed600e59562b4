use flightdesk_core::ValidatedBooking;
use crate::config::NotifierConfig;

const DEFAULT_SCOPE: &str = "Local";
const DEFAULT_CLASS: &str = "Economy";
const DEFAULT_CHILDREN: &str = "0";
const DEFAULT_REQUIREMENTS: &str = "None provided";

/// Escapes `& < > " '` so text cannot be read as markup.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inserts `<br />` before each line break. `\r\n` and `\n\r` count as one break.
pub fn nl2br(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\r' && c != '\n' {
            out.push(c);
            continue;
        }

        out.push_str("<br />");
        out.push(c);
        let partner = if c == '\r' { '\n' } else { '\r' };
        if chars.peek() == Some(&partner) {
            out.push(partner);
            chars.next();
        }
    }
    out
}

fn upper_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

fn detail_row(label: &str, value: &str, muted: &str) -> String {
    format!(
        r#"                <tr>
                  <td style="color:{muted};font-size:12px;">{label}</td>
                  <td style="font-weight:600;">{value}</td>
                </tr>
"#
    )
}

/// Renders the booking summary sent to the operator. Every submitted value goes
/// through [`escape_html`] before it is placed in the document.
pub fn render_booking_email(booking: &ValidatedBooking, config: &NotifierConfig) -> String {
    let form = booking.submission();
    let brand = &config.brand;
    let company = escape_html(&config.company_name);

    let mut rows = String::new();
    rows.push_str(&detail_row("Trip Type", &escape_html(&upper_first(&form.trip_type)), &brand.muted));
    rows.push_str(&detail_row("From", &escape_html(&form.from), &brand.muted));
    rows.push_str(&detail_row("To", &escape_html(&form.to), &brand.muted));
    rows.push_str(&detail_row("Departure", &escape_html(&form.departure_date), &brand.muted));
    if booking.is_round_trip() {
        rows.push_str(&detail_row("Return", &escape_html(&form.return_date), &brand.muted));
    }
    let passengers = format!(
        "Adults: {} | Children: {}",
        escape_html(&form.adults),
        escape_html(or_default(&form.children, DEFAULT_CHILDREN)),
    );
    rows.push_str(&detail_row("Passengers", &passengers, &brand.muted));
    rows.push_str(&detail_row("Class", &escape_html(or_default(&form.travel_class, DEFAULT_CLASS)), &brand.muted));
    rows.push_str(&detail_row("Phone", &escape_html(&form.phone), &brand.muted));

    let scope = escape_html(or_default(&form.flight_scope, DEFAULT_SCOPE));
    let requirements = nl2br(&escape_html(or_default(&form.additional_requirements, DEFAULT_REQUIREMENTS)));
    let support_phone = escape_html(&config.support_phone);
    let website = escape_html(&config.website);
    let title = escape_html(&config.subject);

    let primary = &brand.primary;
    let accent = &brand.accent;
    let secondary = &brand.secondary;
    let background = &brand.background;
    let card = &brand.card;
    let muted = &brand.muted;

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>New Flight Booking</title>
<link rel="preconnect" href="https://fonts.googleapis.com">
<link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
<link href="https://fonts.googleapis.com/css2?family=Poppins:wght@400;600;700&display=swap" rel="stylesheet">
</head>
<body style="margin:0;background:{background};font-family:Poppins,Arial,Helvetica,sans-serif;">
  <table role="presentation" cellpadding="0" cellspacing="0" width="100%" style="background:{background};padding:32px 12px;">
    <tr>
      <td align="center">
        <table role="presentation" cellpadding="0" cellspacing="0" width="100%" style="max-width:720px;background:{card};border-radius:16px;box-shadow:0 10px 30px rgba(2,6,23,0.08);overflow:hidden;">
          <tr>
            <td style="padding:28px 32px;background:linear-gradient(135deg,{primary} 0%,{secondary} 50%,{accent} 100%);color:#fff;">
              <table width="100%">
                <tr>
                  <td>
                    <h1 style="margin:0;font-size:22px;line-height:1.3;">{title}</h1>
                    <p style="margin:6px 0 0;color:rgba(255,255,255,0.85);">{company}</p>
                  </td>
                  <td align="right">
                    <span style="display:inline-block;padding:8px 12px;border-radius:999px;background:rgba(255,255,255,0.12);color:#fff;font-weight:600;font-size:12px;letter-spacing:.3px;">{scope}</span>
                  </td>
                </tr>
              </table>
            </td>
          </tr>
          <tr>
            <td style="padding:28px 32px;">
              <table width="100%" cellpadding="0" cellspacing="0" style="border-collapse:separate;border-spacing:0 12px;">
{rows}              </table>

              <div style="margin-top:24px;background:#f8fafc;border:1px solid #e2e8f0;border-radius:12px;padding:16px 18px;">
                <div style="color:{muted};font-size:12px;margin-bottom:6px;">Additional Requirements</div>
                <div style="font-size:14px;line-height:1.6;">{requirements}</div>
              </div>

              <div style="margin-top:28px;text-align:center;">
                <a href="tel:{support_phone}" style="display:inline-block;background:{accent};color:#fff;text-decoration:none;padding:12px 18px;border-radius:999px;font-weight:700;box-shadow:0 10px 20px rgba(16,185,129,0.25);">Call Customer Support</a>
              </div>
            </td>
          </tr>
          <tr>
            <td style="padding:16px 32px;background:#0b1220;color:#94a3b8;font-size:12px;">
              <table width="100%">
                <tr>
                  <td>
                    {company}<br/>
                    <span style="color:#64748b">New Booking Notification</span>
                  </td>
                  <td align="right">{website}</td>
                </tr>
              </table>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightdesk_core::{validate, BookingSubmission};

    fn roundtrip() -> BookingSubmission {
        BookingSubmission {
            trip_type: "roundtrip".to_string(),
            from: "Lagos".to_string(),
            to: "Abuja".to_string(),
            departure_date: "2025-01-01".to_string(),
            return_date: "2025-01-10".to_string(),
            adults: "2".to_string(),
            children: String::new(),
            phone: "08000000000".to_string(),
            ..Default::default()
        }
    }

    fn render(submission: BookingSubmission) -> String {
        let booking = validate(submission).expect("valid booking");
        render_booking_email(&booking, &NotifierConfig::default())
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_nl2br() {
        assert_eq!(nl2br("a\nb"), "a<br />\nb");
        assert_eq!(nl2br("a\r\nb"), "a<br />\r\nb");
        assert_eq!(nl2br("a\n\rb"), "a<br />\n\rb");
        assert_eq!(nl2br("a\n\nb"), "a<br />\n<br />\nb");
        assert_eq!(nl2br("plain"), "plain");
    }

    #[test]
    fn test_upper_first() {
        assert_eq!(upper_first("roundtrip"), "Roundtrip");
        assert_eq!(upper_first("oneway"), "Oneway");
        assert_eq!(upper_first(""), "");
    }

    #[test]
    fn test_roundtrip_includes_return_row() {
        let html = render(roundtrip());
        assert!(html.contains(">Return</td>"));
        assert!(html.contains("2025-01-10"));
        assert!(html.contains(">Roundtrip</td>"));
    }

    #[test]
    fn test_oneway_omits_return_row() {
        let html = render(BookingSubmission {
            trip_type: "oneway".to_string(),
            return_date: String::new(),
            ..roundtrip()
        });
        assert!(!html.contains(">Return</td>"));
        assert!(html.contains(">Oneway</td>"));
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let html = render(roundtrip());
        assert!(html.contains(">Local</span>"));
        assert!(html.contains("Adults: 2 | Children: 0"));
        assert!(html.contains(">Economy</td>"));
        assert!(html.contains(">None provided</div>"));
    }

    #[test]
    fn test_submitted_optional_fields_shown() {
        let html = render(BookingSubmission {
            flight_scope: "International".to_string(),
            children: "3".to_string(),
            travel_class: "Business".to_string(),
            additional_requirements: "Wheelchair\nVegetarian meal".to_string(),
            ..roundtrip()
        });
        assert!(html.contains(">International</span>"));
        assert!(html.contains("Adults: 2 | Children: 3"));
        assert!(html.contains(">Business</td>"));
        assert!(html.contains("Wheelchair<br />\nVegetarian meal"));
    }

    #[test]
    fn test_unsanitized_markup_is_escaped() {
        let html = render(BookingSubmission {
            from: "<script>x</script>".to_string(),
            additional_requirements: "<img src=x onerror=alert(1)>".to_string(),
            ..roundtrip()
        });
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
    }

    #[test]
    fn test_brand_and_identity_from_config() {
        let mut config = NotifierConfig::default();
        config.brand.accent = "#123456".to_string();
        config.company_name = "Acme Air".to_string();
        config.support_phone = "+15550100".to_string();

        let booking = validate(roundtrip()).expect("valid booking");
        let html = render_booking_email(&booking, &config);
        assert!(html.contains("#123456"));
        assert!(html.contains("Acme Air"));
        assert!(html.contains("tel:+15550100"));
        assert!(!html.contains("Booming Place"));
    }
}
