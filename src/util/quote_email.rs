//! Admin notification content for a newly stored quote.
//!
//! Every customer-supplied value is HTML-escaped before it lands in the HTML
//! body. The plain-text body carries the same fields unescaped.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::model::quote::Quote;
use crate::util::email::EmailMessage;

pub const NOT_SPECIFIED: &str = "Not specified";

fn yes_no(flag: bool) -> &'static str {
    if flag { "✅ Yes" } else { "❌ No" }
}

fn or_not_specified(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => NOT_SPECIFIED,
    }
}

pub fn subject(quote: &Quote) -> String {
    format!("🔨 New Quote Request from {}", quote.name)
}

fn submitted_on(quote: &Quote) -> String {
    quote.created_at.format("%B %d, %Y at %I:%M %p UTC").to_string()
}

pub fn render_text(quote: &Quote) -> String {
    format!(
        r#"New Quote Request - Granite Joinery Experts

CUSTOMER DETAILS
Name:     {name}
Phone:    {phone}
Email:    {email}
Location: {location}

PROJECT INFORMATION
Service:           {service}
Budget:            {budget}
Timeline:          {timeline}
Consultation:      {consultation}
Marketing updates: {updates}

PROJECT DETAILS
{message}

Remember: respond within 24 hours for best results!
Quote submitted on {submitted}"#,
        name = quote.name,
        phone = quote.phone,
        email = quote.email,
        location = quote.location,
        service = quote.service,
        budget = or_not_specified(&quote.budget),
        timeline = or_not_specified(&quote.timeline),
        consultation = yes_no(quote.consultation_requested),
        updates = yes_no(quote.marketing_updates),
        message = quote.message,
        submitted = submitted_on(quote),
    )
}

pub fn render_html(quote: &Quote) -> String {
    let row = |label: &str, value: &str| {
        format!(
            r#"<tr><td style="padding: 8px 0; font-weight: bold; width: 120px;">{label}:</td><td style="padding: 8px 0;">{value}</td></tr>"#
        )
    };
    let phone_link = format!(
        r#"<a href="tel:{}" style="color: #d97706;">{}</a>"#,
        attr(&quote.phone),
        text(&quote.phone)
    );
    let email_link = format!(
        r#"<a href="mailto:{}" style="color: #d97706;">{}</a>"#,
        attr(&quote.email),
        text(&quote.email)
    );

    let customer_rows = [
        row("Name", &text(&quote.name)),
        row("Phone", &phone_link),
        row("Email", &email_link),
        row("Location", &text(&quote.location)),
    ]
    .concat();
    let project_rows = [
        row("Service", &text(&quote.service)),
        row("Budget", &text(or_not_specified(&quote.budget))),
        row("Timeline", &text(or_not_specified(&quote.timeline))),
        row("Consultation", yes_no(quote.consultation_requested)),
        row("Updates", yes_no(quote.marketing_updates)),
    ]
    .concat();

    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <div style="background: linear-gradient(135deg, #d97706 0%, #b45309 100%); color: white; padding: 20px; border-radius: 10px 10px 0 0;">
      <h1 style="margin: 0; font-size: 24px;">🔨 New Quote Request</h1>
      <p style="margin: 5px 0 0 0; opacity: 0.9;">Granite Joinery Experts</p>
    </div>
    <div style="background: #f8f9fa; padding: 20px; border: 1px solid #e9ecef;">
      <h2 style="color: #d97706; margin-top: 0;">Customer Details</h2>
      <table style="width: 100%; border-collapse: collapse;">{customer_rows}</table>
    </div>
    <div style="background: white; padding: 20px; border: 1px solid #e9ecef; border-top: none;">
      <h2 style="color: #d97706; margin-top: 0;">Project Information</h2>
      <table style="width: 100%; border-collapse: collapse;">{project_rows}</table>
      <h3 style="color: #d97706; margin-top: 25px;">Project Details:</h3>
      <div style="background: #f8f9fa; padding: 15px; border-radius: 5px; border-left: 4px solid #d97706;">
        <p style="margin: 0; white-space: pre-wrap;">{message}</p>
      </div>
    </div>
    <div style="background: #d97706; color: white; padding: 20px; border-radius: 0 0 10px 10px; text-align: center;">
      <p style="margin: 0;"><strong>⏰ Remember:</strong> Respond within 24 hours for best results!</p>
      <div style="margin-top: 15px;">
        <a href="tel:{phone_attr}" style="background: white; color: #d97706; padding: 8px 16px; text-decoration: none; border-radius: 5px; margin: 0 5px; font-weight: bold;">📞 Call Now</a>
        <a href="mailto:{email_attr}" style="background: white; color: #d97706; padding: 8px 16px; text-decoration: none; border-radius: 5px; margin: 0 5px; font-weight: bold;">✉️ Email</a>
      </div>
    </div>
    <div style="text-align: center; margin-top: 20px; color: #666; font-size: 12px;">
      <p>Quote submitted on {submitted}</p>
    </div>
  </div>
</body>
</html>"#,
        customer_rows = customer_rows,
        project_rows = project_rows,
        message = text(&quote.message),
        phone_attr = attr(&quote.phone),
        email_attr = attr(&quote.email),
        submitted = submitted_on(quote),
    )
}

/// Full notification addressed to `admin_email`.
pub fn render_quote_notification(quote: &Quote, admin_email: &str) -> EmailMessage {
    EmailMessage::new(admin_email.to_string(), subject(quote))
        .with_text_body(render_text(quote))
        .with_html_body(render_html(quote))
}
