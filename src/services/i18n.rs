//! Message translation for the rendered pages.
//!
//! Messages are keyed by their English text. The table for the configured
//! language is built once at startup; a key without a translation is shown
//! as is.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Czech,
}

impl Language {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "en" | "english" => Self::English,
            _ => Self::Czech,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Czech => "cs",
        }
    }
}

const CZECH: &[(&str, &str)] = &[
    ("for", "pro"),
    ("from", "od"),
    ("to", "do"),
    ("Graph", "Graf"),
    ("Log", "Záznamy"),
    ("Exe", "Skripty"),
    ("No", "Žádné"),
    ("values", "hodnoty"),
    ("value", "hodnota"),
    ("graph", "graf"),
    ("Remove", "Smazat"),
    ("Script name", "Název skriptu"),
    ("This field is required.", "Povinné pole."),
    ("Script content", "Obsah skriptu"),
    ("Add Script", "Přidat skript"),
    ("Progress in Time", "Vývoj v čase"),
    ("Average", "Průměr"),
    ("Maximal", "Největší"),
    ("difference", "rozdíl"),
    ("Minimum", "Minimum"),
    ("Maximum", "Maximum"),
    ("Measurement from", "Měřeno od"),
    ("Measurement to", "Měřeno do"),
    ("Sensors", "Senzory"),
    ("Update Graph", "Aktualizovat Graf"),
    ("Browser", "Logy"),
    ("Log from", "Logy od"),
    ("Log to", "Logy do"),
    ("Level", "Úroveň"),
    ("Update Log", "Aktualizovat logy"),
    ("Current values", "Aktuální hodnoty"),
    ("Sensor", "Senzor"),
    ("Unit", "Jednotka"),
    ("Time", "Čas"),
    ("Message", "Zpráva"),
    ("no data", "žádná data"),
    ("Sign in", "Přihlásit"),
    ("Sign out", "Odhlásit"),
    ("Username", "Uživatelské jméno"),
    ("Password", "Heslo"),
    ("Please enter your username.", "Prosím vyplňte své uživatelské jméno."),
    ("Please enter your password.", "Prosím vyplňte své heslo."),
    (
        "Invalid username or password.",
        "Nesprávné přihlašovací jméno nebo heslo.",
    ),
    ("Trace", "Trasování"),
    ("Debug", "Ladění"),
    ("Info", "Informace"),
    ("Warning", "Varování"),
    ("Error", "Chyba"),
    ("Critical", "Kritické"),
];

#[derive(Debug, Clone)]
pub struct Translator {
    language: Language,
    table: HashMap<&'static str, &'static str>,
}

impl Translator {
    #[must_use]
    pub fn new(language: Language) -> Self {
        let table = match language {
            Language::English => HashMap::new(),
            Language::Czech => CZECH.iter().copied().collect(),
        };
        Self { language, table }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn tr<'a>(&'a self, message: &'a str) -> &'a str {
        match self.table.get(message) {
            Some(translated) => *translated,
            None => {
                if self.language != Language::English {
                    tracing::trace!(message = %message, "missing_translation");
                }
                message
            }
        }
    }
}
