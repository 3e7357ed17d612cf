use maud::{html, Markup};

use super::layout;
use crate::services::i18n::Translator;

/// Sign-in form. `errors` are untranslated message keys; `username` refills
/// the field after a failed attempt. The password is never echoed back.
#[must_use]
pub fn page(t: &Translator, errors: &[&str], username: &str) -> Markup {
    let body = html! {
        section {
            @for error in errors {
                p.error { (t.tr(error)) }
            }
            form method="post" action="/sign/in" {
                p {
                    label {
                        (t.tr("Username")) ": "
                        input type="text" name="username" value=(username) autofocus;
                    }
                }
                p {
                    label {
                        (t.tr("Password")) ": "
                        input type="password" name="password";
                    }
                }
                button type="submit" { (t.tr("Sign in")) }
            }
        }
    };
    layout(t, None, t.tr("Sign in"), body)
}
