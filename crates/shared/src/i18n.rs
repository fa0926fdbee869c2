//! Translation tables for the planner interface.
//!
//! Lookups go through the typed [`TranslationKey`] space. A key missing from a
//! language table resolves to the key string itself, so partially translated
//! tables still render something recognisable.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Pt,
    It,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::It => "it",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pt" | "pt-BR" => Some(Language::Pt),
            "it" | "it-IT" => Some(Language::It),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unsupported language: {s}"))
    }
}

/// Keys used by the planner and its legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationKey {
    PlannerTitle,
    Today,
    DateColumn,
    Guests,
    GuestsLabel,
    CheckIn,
    CheckOut,
    Status,
    Value,
    ClickToOpen,
    Available,
    DayUse,
    MovedSuccess,
    MovedError,
    DragHint,
    LoadError,
    StatusRequest,
    StatusConfirmed,
    StatusInProgress,
    StatusFinished,
    StatusCanceled,
    StatusPending,
    StatusOther,
}

impl TranslationKey {
    /// Dotted key string, also the fallback text.
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationKey::PlannerTitle => "planner.title",
            TranslationKey::Today => "planner.today",
            TranslationKey::DateColumn => "planner.date",
            TranslationKey::Guests => "planner.guests",
            TranslationKey::GuestsLabel => "planner.guestsLabel",
            TranslationKey::CheckIn => "planner.checkIn",
            TranslationKey::CheckOut => "planner.checkOut",
            TranslationKey::Status => "planner.status",
            TranslationKey::Value => "planner.value",
            TranslationKey::ClickToOpen => "planner.clickToOpen",
            TranslationKey::Available => "planner.available",
            TranslationKey::DayUse => "planner.dayUse",
            TranslationKey::MovedSuccess => "planner.movedSuccess",
            TranslationKey::MovedError => "planner.movedError",
            TranslationKey::DragHint => "planner.dragHint",
            TranslationKey::LoadError => "planner.loadError",
            TranslationKey::StatusRequest => "status.request",
            TranslationKey::StatusConfirmed => "status.confirmed",
            TranslationKey::StatusInProgress => "status.inProgress",
            TranslationKey::StatusFinished => "status.finished",
            TranslationKey::StatusCanceled => "status.canceled",
            TranslationKey::StatusPending => "status.pending",
            TranslationKey::StatusOther => "status.other",
        }
    }
}

const PT_ENTRIES: &[(&str, &str)] = &[
    ("planner.title", "Planner de Ocupação"),
    ("planner.today", "Hoje"),
    ("planner.date", "Data"),
    ("planner.guests", "hóspedes"),
    ("planner.guestsLabel", "Hóspedes"),
    ("planner.checkIn", "Check-in"),
    ("planner.checkOut", "Check-out"),
    ("planner.status", "Status"),
    ("planner.value", "Valor"),
    ("planner.clickToOpen", "Clique para ver detalhes"),
    ("planner.available", "Disponível"),
    ("planner.dayUse", "Day-Use"),
    ("planner.movedSuccess", "Reserva movida com sucesso!"),
    ("planner.movedError", "Erro ao mover reserva"),
    ("planner.dragHint", "Arraste para mover"),
    ("planner.loadError", "Não foi possível carregar as reservas"),
    ("status.request", "Solicitação"),
    ("status.confirmed", "Confirmada"),
    ("status.inProgress", "Em Andamento"),
    ("status.finished", "Finalizada"),
    ("status.canceled", "Cancelada"),
    ("status.pending", "Pendente"),
    ("status.other", "Outro status"),
];

const IT_ENTRIES: &[(&str, &str)] = &[
    ("planner.title", "Planner Occupazione"),
    ("planner.today", "Oggi"),
    ("planner.date", "Data"),
    ("planner.guests", "ospiti"),
    ("planner.guestsLabel", "Ospiti"),
    ("planner.checkIn", "Check-in"),
    ("planner.checkOut", "Check-out"),
    ("planner.status", "Stato"),
    ("planner.value", "Valore"),
    ("planner.clickToOpen", "Clicca per vedere i dettagli"),
    ("planner.available", "Disponibile"),
    ("planner.dayUse", "Day-Use"),
    ("planner.movedSuccess", "Prenotazione spostata con successo!"),
    ("planner.movedError", "Errore nello spostare la prenotazione"),
    ("planner.dragHint", "Trascina per spostare"),
    ("planner.loadError", "Impossibile caricare le prenotazioni"),
    ("status.request", "Richiesta"),
    ("status.confirmed", "Confermata"),
    ("status.inProgress", "In Corso"),
    ("status.finished", "Completata"),
    ("status.canceled", "Cancellata"),
    ("status.pending", "In Attesa"),
    ("status.other", "Altro stato"),
];

const PT_MONTHS: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

const IT_MONTHS: [&str; 12] = [
    "gennaio", "febbraio", "marzo", "aprile", "maggio", "giugno", "luglio", "agosto",
    "settembre", "ottobre", "novembre", "dicembre",
];

const PT_WEEKDAYS: [&str; 7] = ["seg", "ter", "qua", "qui", "sex", "sáb", "dom"];
const IT_WEEKDAYS: [&str; 7] = ["lun", "mar", "mer", "gio", "ven", "sab", "dom"];

lazy_static::lazy_static! {
    static ref PT_TABLE: HashMap<&'static str, &'static str> = PT_ENTRIES.iter().copied().collect();
    static ref IT_TABLE: HashMap<&'static str, &'static str> = IT_ENTRIES.iter().copied().collect();
}

/// Translator bound to one language, handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn table(&self) -> &'static HashMap<&'static str, &'static str> {
        match self.language {
            Language::Pt => &*PT_TABLE,
            Language::It => &*IT_TABLE,
        }
    }

    /// Translates a typed key.
    pub fn t(&self, key: TranslationKey) -> String {
        self.lookup(key.as_str())
    }

    /// Translates a raw dotted key, returning the key itself when missing.
    pub fn lookup(&self, key: &str) -> String {
        self.table()
            .get(key)
            .map(|s| (*s).to_string())
            .unwrap_or_else(|| key.to_string())
    }

    /// Month heading such as `março 2024`.
    pub fn month_label(&self, year: i32, month: u32) -> String {
        let names = match self.language {
            Language::Pt => &PT_MONTHS,
            Language::It => &IT_MONTHS,
        };
        let name = names
            .get(month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("");
        format!("{name} {year}")
    }

    /// Short row label such as `mar 05`.
    pub fn day_label(&self, date: NaiveDate) -> String {
        let names = match self.language {
            Language::Pt => &PT_MONTHS,
            Language::It => &IT_MONTHS,
        };
        let month = names[date.month0() as usize];
        let short: String = month.chars().take(3).collect();
        format!("{short} {:02}", date.day())
    }

    /// Abbreviated weekday name.
    pub fn weekday_label(&self, weekday: Weekday) -> &'static str {
        let names = match self.language {
            Language::Pt => &PT_WEEKDAYS,
            Language::It => &IT_WEEKDAYS,
        };
        names[weekday.num_days_from_monday() as usize]
    }
}
