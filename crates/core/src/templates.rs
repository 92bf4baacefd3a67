//! Plain-text email templates with `{{ key }}` placeholders.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("placeholder regex is valid")
});

/// A subject + body pair before substitution.
#[derive(Debug, Clone, Copy)]
pub struct EmailTemplate {
    pub subject: &'static str,
    pub body: &'static str,
}

/// A rendered email ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}

pub const OPTION_PLACED: EmailTemplate = EmailTemplate {
    subject: "Option posée sur le lot {{ lot_reference }}",
    body: "Bonjour,\n\n\
           Une option a été posée sur le lot {{ lot_reference }} de la résidence \
           {{ residence }} par {{ partenaire }}.\n\
           Elle expire le {{ expires_at }}.\n\n\
           L'équipe YAM Management",
};

pub const OPTION_EXPIRING: EmailTemplate = EmailTemplate {
    subject: "Votre option sur le lot {{ lot_reference }} expire bientôt",
    body: "Bonjour {{ partenaire }},\n\n\
           Votre option sur le lot {{ lot_reference }} ({{ residence }}) expire le \
           {{ expires_at }}. Sans réservation d'ici là, le lot sera remis en vente.\n\n\
           L'équipe YAM Management",
};

pub const WORKFLOW_UPDATE: EmailTemplate = EmailTemplate {
    subject: "Avancement de votre logement : {{ step }}",
    body: "Bonjour {{ prenom }},\n\n\
           L'étape « {{ step }} » de votre lot {{ lot_reference }} est maintenant \
           {{ status }}.\n{{ note }}\n\n\
           Retrouvez le détail sur votre espace acquéreur.\n\n\
           L'équipe YAM Management",
};

pub const BIRTHDAY: EmailTemplate = EmailTemplate {
    subject: "Joyeux anniversaire {{ prenom }} !",
    body: "Bonjour {{ prenom }},\n\n\
           Toute l'équipe YAM Management vous souhaite un très joyeux anniversaire.\n\n\
           L'équipe YAM Management",
};

pub const PASSWORD_RESET: EmailTemplate = EmailTemplate {
    subject: "Réinitialisation de votre mot de passe",
    body: "Bonjour,\n\n\
           Pour choisir un nouveau mot de passe, ouvrez le lien suivant :\n\
           {{ reset_link }}\n\n\
           Ce lien est valable une heure et ne peut être utilisé qu'une fois.\n\
           Si vous n'êtes pas à l'origine de cette demande, ignorez ce message.\n\n\
           L'équipe YAM Management",
};

/// Substitute `{{ key }}` placeholders from a JSON object.
///
/// Strings are inserted verbatim, other scalars via their JSON text.
/// Missing keys and `null` render as an empty string.
pub fn render_str(template: &str, vars: &Value) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            match vars.get(&caps[1]) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            }
        })
        .into_owned()
}

impl EmailTemplate {
    pub fn render(&self, vars: &Value) -> RenderedEmail {
        RenderedEmail {
            subject: render_str(self.subject, vars),
            body: render_str(self.body, vars),
        }
    }
}
