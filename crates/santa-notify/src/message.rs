//! Per-participant message composition.

use santa_core::{Assignment, Participant, RunConfig};

use crate::error::NotifyError;

/// One outgoing message.
///
/// Carries both an HTML body and a plain-text alternative with the same
/// content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Sender mailbox.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Plain-text body.
    pub text: String,
}

/// Compose the message for `participant`.
///
/// The message greets the participant, names their target, and lists every
/// participant's contact address so the group can coordinate. It never
/// reveals anyone else's target.
///
/// # Errors
///
/// Returns `NotifyError::Unassigned` if the assignment has no target for
/// the participant.
pub fn compose(
    config: &RunConfig,
    assignment: &Assignment,
    participant: &Participant,
) -> Result<Message, NotifyError> {
    let target = assignment
        .target_of(&participant.name)
        .ok_or_else(|| NotifyError::Unassigned { participant: participant.name.clone() })?;

    let heading = match config.group_name() {
        Some(group) => format!("{group} Secret Santa"),
        None => "Secret Santa".to_string(),
    };

    Ok(Message {
        from: config.sender().mailbox(),
        to: participant.email.clone(),
        subject: config.subject().to_string(),
        html: html_body(config, &heading, &participant.name, target),
        text: text_body(config, &heading, &participant.name, target),
    })
}

fn text_body(config: &RunConfig, heading: &str, name: &str, target: &str) -> String {
    let mut lines = vec![
        heading.to_string(),
        String::new(),
        format!("Hi {name},"),
        String::new(),
        format!("Your Secret Santa target is {target}!"),
        String::new(),
        "Contact list:".to_string(),
    ];
    lines.extend(config.roster().iter().map(|p| format!("- {} <{}>", p.name, p.email)));
    lines.join("\n")
}

fn html_body(config: &RunConfig, heading: &str, name: &str, target: &str) -> String {
    let mut html = String::from("<html>\n  <body>\n");
    html.push_str(&format!("    <h2>{}</h2>\n", escape(heading)));
    html.push_str(&format!("    <p>Hi {},<br><br>\n", escape(name)));
    html.push_str(&format!(
        "      Your Secret Santa target is <b>{}</b>!\n    </p>\n",
        escape(target)
    ));
    html.push_str("    <p>Contact list, for swapping gift ideas:</p>\n    <ul>\n");
    for p in config.roster() {
        html.push_str(&format!(
            "      <li>{} &lt;{}&gt;</li>\n",
            escape(&p.name),
            escape(&p.email)
        ));
    }
    html.push_str("    </ul>\n  </body>\n</html>\n");
    html
}

/// Escape text for inclusion in HTML element content.
pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
