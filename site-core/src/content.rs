//! Static page content.
//!
//! Everything here is presentational: headings, paragraphs and links keyed
//! by [`Route`]. The shell renders it verbatim and never inspects it beyond
//! following links.

use once_cell::sync::Lazy;

use crate::consent::Category;
use crate::router::Route;

/// Booking page for the initial consultation.
pub const BOOKING_URL: &str = "https://tidycal.com/antoniovonstrachwitz/arc-assessment-erstgespraech";

/// Where a link leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// A path on this site; must go through the router.
    Internal(&'static str),
    /// Anything else (other sites, `mailto:`, `tel:`).
    External(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub label: &'static str,
    pub target: LinkTarget,
}

impl Link {
    const fn internal(label: &'static str, path: &'static str) -> Self {
        Self {
            label,
            target: LinkTarget::Internal(path),
        }
    }

    const fn external(label: &'static str, url: &'static str) -> Self {
        Self {
            label,
            target: LinkTarget::External(url),
        }
    }
}

/// One piece of page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(&'static str),
    Subheading(&'static str),
    Paragraph(&'static str),
    List(Vec<&'static str>),
    Link(Link),
}

/// A complete page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub route: Route,
    pub title: &'static str,
    pub blocks: Vec<Block>,
    /// The page's primary external call to action, if any.
    pub call_to_action: Option<Link>,
}

impl Page {
    /// Links in reading order, call to action first.
    pub fn links(&self) -> Vec<Link> {
        self.call_to_action
            .into_iter()
            .chain(self.blocks.iter().filter_map(|b| match b {
                Block::Link(link) => Some(*link),
                _ => None,
            }))
            .collect()
    }

    /// The page as plain text lines.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.to_uppercase(), String::new()];
        if let Some(cta) = &self.call_to_action {
            lines.push(format!("[{}]", cta.label));
            lines.push(String::new());
        }
        for block in &self.blocks {
            match block {
                Block::Heading(text) => {
                    lines.push(String::new());
                    lines.push(text.to_string());
                }
                Block::Subheading(text) => lines.push(format!("- {text} -")),
                Block::Paragraph(text) => lines.push(text.to_string()),
                Block::List(items) => lines.extend(items.iter().map(|i| format!("  • {i}"))),
                Block::Link(link) => lines.push(format!("[{}]", link.label)),
            }
        }
        lines
    }
}

/// Header and footer copy shown on every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub brand: &'static str,
    pub header_cta: Link,
    pub company: &'static str,
    pub tagline: &'static str,
    pub address: Vec<&'static str>,
    pub footer_links: Vec<Link>,
    /// Label of the always-present control that opens the settings panel.
    pub settings_label: &'static str,
}

/// Copy for the consent banner and settings panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentCopy {
    pub title: &'static str,
    pub banner_text: &'static str,
    pub banner_links: Vec<Link>,
    pub panel_intro: &'static str,
    pub accept_all: &'static str,
    pub accept_necessary: &'static str,
    pub open_settings: &'static str,
    pub save_selection: &'static str,
    pub close: &'static str,
}

/// Label and explanation for one consent category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCopy {
    pub label: &'static str,
    pub description: &'static str,
}

/// Source of everything the shell displays.
pub trait ContentProvider {
    fn page(&self, route: Route) -> &Page;

    fn chrome(&self) -> &Chrome;

    fn consent_copy(&self) -> &ConsentCopy;

    fn category(&self, category: Category) -> &CategoryCopy;
}

/// The site's built-in German content.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticContent;

impl ContentProvider for StaticContent {
    fn page(&self, route: Route) -> &Page {
        match route {
            Route::Home => &CATALOG.home,
            Route::LegalNotice => &CATALOG.legal_notice,
            Route::PrivacyPolicy => &CATALOG.privacy_policy,
            Route::CookiePolicy => &CATALOG.cookie_policy,
        }
    }

    fn chrome(&self) -> &Chrome {
        &CATALOG.chrome
    }

    fn consent_copy(&self) -> &ConsentCopy {
        &CATALOG.consent
    }

    fn category(&self, category: Category) -> &CategoryCopy {
        match category {
            Category::Necessary => &CATALOG.categories[0],
            Category::Analytics => &CATALOG.categories[1],
            Category::Marketing => &CATALOG.categories[2],
            Category::Functional => &CATALOG.categories[3],
        }
    }
}

struct Catalog {
    home: Page,
    legal_notice: Page,
    privacy_policy: Page,
    cookie_policy: Page,
    chrome: Chrome,
    consent: ConsentCopy,
    categories: [CategoryCopy; 4],
}

const BACK_HOME: Block = Block::Link(Link::internal("Zurück zur Startseite", "/"));
const MAIL: Link = Link::external(
    "webmaster@strachwitzconsulting.com",
    "mailto:webmaster@strachwitzconsulting.com",
);
const PHONE: Link = Link::external("+49 9325 391 99 63", "tel:+4993253919963");

static CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog {
    home: home_page(),
    legal_notice: legal_notice_page(),
    privacy_policy: privacy_policy_page(),
    cookie_policy: cookie_policy_page(),
    chrome: Chrome {
        brand: "ARC Assessment",
        header_cta: Link::external("Erstgespräch vereinbaren", BOOKING_URL),
        company: "Strachwitz Consulting",
        tagline: "Wir machen Innovation sicher.",
        address: vec![
            "Ihr Partner für nachhaltiges Wachstum im Mittelstand",
            "António Freiherr von Strachwitz",
            "Wüstenfelden 3",
            "97355 Castell",
            "Deutschland",
        ],
        footer_links: vec![
            Link::internal("Impressum", "/Impressum"),
            Link::internal("Datenschutz", "/Datenschutz"),
            Link::internal("Cookies", "/Cookies"),
        ],
        settings_label: "Cookie-Einstellungen",
    },
    consent: ConsentCopy {
        title: "Cookie-Einstellungen",
        banner_text: "Wir verwenden Cookies, um Ihnen ein optimales Website-Erlebnis zu bieten. \
            Technisch notwendige Cookies sind erforderlich für den Betrieb der Website. \
            Statistik-, Marketing- und funktionale Cookies helfen uns, unser Angebot zu verbessern. \
            Sie können Ihre Einwilligung jederzeit anpassen oder widerrufen.",
        banner_links: vec![
            Link::internal("Datenschutzerklärung", "/Datenschutz"),
            Link::internal("Cookie-Richtlinie", "/Cookies"),
        ],
        panel_intro: "Wir verwenden Cookies und ähnliche Technologien, um Ihnen ein optimales \
            Nutzungserlebnis zu bieten. Sie können Ihre Einwilligung für einzelne \
            Cookie-Kategorien erteilen oder ablehnen.",
        accept_all: "Alle akzeptieren",
        accept_necessary: "Nur Notwendige",
        open_settings: "Einstellungen",
        save_selection: "Auswahl speichern",
        close: "Schließen",
    },
    categories: [
        CategoryCopy {
            label: "Notwendige Cookies",
            description: "Diese Cookies sind für den Betrieb der Website erforderlich und können \
                nicht deaktiviert werden. Sie speichern z.B. Ihre Cookie-Einstellungen.",
        },
        CategoryCopy {
            label: "Statistik-Cookies",
            description: "Diese Cookies helfen uns zu verstehen, wie Besucher mit unserer Website \
                interagieren, indem Informationen anonym gesammelt und gemeldet werden.",
        },
        CategoryCopy {
            label: "Marketing-Cookies",
            description: "Diese Cookies werden verwendet, um Besuchern auf Webseiten zu folgen und \
                relevante Werbung zu präsentieren.",
        },
        CategoryCopy {
            label: "Funktionale Cookies",
            description: "Diese Cookies ermöglichen erweiterte Funktionalität und Personalisierung, \
                wie z.B. Videos und Live-Chats.",
        },
    ],
});

fn home_page() -> Page {
    use Block::{Heading, List, Paragraph, Subheading};

    Page {
        route: Route::Home,
        title: "Innovation trifft Rechtssicherheit: Das AI Readiness & Compliance Assessment",
        call_to_action: Some(Link::external("Jetzt Erstgespräch vereinbaren", BOOKING_URL)),
        blocks: vec![
            Paragraph(
                "Machen Sie Ihr Unternehmen fit für die KI-Ära – profitabel, operativ umsetzbar \
                 und rechtlich abgesichert.",
            ),
            Heading("Die Herausforderung: Wachstum vs. Regulierung"),
            Paragraph(
                "Sie wissen, dass Künstliche Intelligenz enorme Chancen für Ihre Effizienz und \
                 Ihren Umsatz bietet. Doch oft scheitert die Umsetzung im Mittelstand an zwei \
                 entscheidenden Hürden.",
            ),
            Subheading("Die operative Unsicherheit"),
            Paragraph(
                "Wo lohnt sich KI wirklich? Welche Use Cases bringen sofortigen ROI? Wie trennen \
                 Sie Hype von echtem Mehrwert?",
            ),
            Subheading("Die rechtliche Bremse"),
            Paragraph(
                "Ist das DSGVO-konform? Was bedeutet der neue EU AI Act für uns? Welche \
                 Dokumentationspflichten kommen auf uns zu?",
            ),
            Heading("Unsere Lösung: Das ARC Assessment"),
            Paragraph(
                "Das AI Readiness & Compliance (ARC) Assessment ist ein integriertes Joint-Offer \
                 von Strachwitz Consulting, das beide Welten vereint.",
            ),
            List(vec![
                "Operative Exzellenz: die profitabelsten KI-Potenziale mit Fokus auf ROI und Machbarkeit",
                "Juristische Fachexpertise: Prüfung bezüglich DSGVO und EU AI Act",
                "Klarer Fahrplan: ein konkreter Aktionsplan für Ihre nächsten Schritte",
            ]),
            Heading("Unsere Pakete"),
            Subheading("ARC „Compact“ – Der Schnelleinstieg"),
            List(vec![
                "Operative Analyse: 3-5 konkrete KI-Use-Cases mit erster ROI-Einschätzung",
                "DSGVO-Gap-Analyse des Status Quo Ihrer Datenverarbeitung",
                "EU AI Act Klassifizierung nach Risikoklassen",
                "Ampel-System & Roadmap mit klarer Go / No-Go Bewertung",
            ]),
            Subheading("ARC „Professional“ – Der Deep-Dive"),
            List(vec![
                "Detaillierte Analyse von 3-5 High-Impact Use Cases",
                "Prüfung der Datenqualität und technischen Machbarkeit",
                "Umfassende DSGVO-Analyse inklusive Vertrags- & Prozess-Check",
                "Umfangreicher Maßnahmenplan zur vollen Compliance",
            ]),
            Heading("Warum diese Kombination?"),
            Paragraph(
                "Sie sparen Zeit und minimieren Risiken, indem Sie Strategie und Recht nicht \
                 getrennt voneinander betrachten.",
            ),
            Heading("Ihr Ergebnis nach dem Assessment"),
            List(vec![
                "Priorisierte KI-Projekte nach ROI und Umsetzbarkeit",
                "Juristische Sicherheit inklusive konkreter Maßnahmen",
                "Klarer Handlungsplan mit Zeitplan und Meilensteinen",
            ]),
            Heading("Die Vorteile auf einen Blick"),
            List(vec![
                "Zeitersparnis: ein Assessment statt zweier separater Analysen",
                "Risikominimierung: Compliance-Risiken erkennen, bevor Sie investieren",
                "ROI-Fokus: KI-Projekte, die sich wirklich rechnen",
                "Praxistauglichkeit: Checklisten und Maßnahmenpläne statt Gutachten",
            ]),
            Heading("Sind Sie bereit für sichere Innovation?"),
            Paragraph(
                "Lassen Sie uns in einem unverbindlichen Vorgespräch besprechen, welches Paket für \
                 Ihre aktuelle Unternehmensphase am besten geeignet ist.",
            ),
            Block::Link(Link::external(
                "Kostenloses Vorgespräch buchen",
                BOOKING_URL,
            )),
        ],
    }
}

fn legal_notice_page() -> Page {
    use Block::{Heading, Paragraph, Subheading};

    Page {
        route: Route::LegalNotice,
        title: "Impressum",
        call_to_action: None,
        blocks: vec![
            Heading("Angaben gemäß § 5 DDG"),
            Paragraph("António Freiherr von Strachwitz, Wüstenfelden 3, 97355 Castell, Deutschland"),
            Heading("Kontakt"),
            Block::Link(PHONE),
            Block::Link(MAIL),
            Paragraph("Umsatzsteuer-Identifikationsnummer gemäß § 27a UStG: DE456847758"),
            Heading("Inhaltlich verantwortlich gemäß § 18 Abs. 2 MStV"),
            Paragraph("António Freiherr von Strachwitz, Wüstenfelden 3, 97355 Castell, Deutschland"),
            Heading("Haftungsausschluss (Disclaimer)"),
            Subheading("Haftung für Inhalte"),
            Paragraph(
                "Als Diensteanbieter sind wir gemäß § 7 Abs. 1 DDG für eigene Inhalte auf diesen \
                 Seiten nach den allgemeinen Gesetzen verantwortlich. Nach §§ 8 bis 10 DDG sind wir \
                 jedoch nicht verpflichtet, übermittelte oder gespeicherte fremde Informationen zu \
                 überwachen.",
            ),
            Subheading("Haftung für Links"),
            Paragraph(
                "Unser Angebot enthält Links zu externen Websites Dritter, auf deren Inhalte wir \
                 keinen Einfluss haben. Für diese fremden Inhalte ist stets der jeweilige Anbieter \
                 oder Betreiber verantwortlich.",
            ),
            Heading("Urheberrecht"),
            Paragraph(
                "Die durch die Seitenbetreiber erstellten Inhalte und Werke auf diesen Seiten \
                 unterliegen dem deutschen Urheberrecht.",
            ),
            Heading("Verbraucherstreitbeilegung (§ 36 VSBG)"),
            Paragraph(
                "Wir sind nicht verpflichtet und nicht bereit, an Streitbeilegungsverfahren vor \
                 einer Verbraucherschlichtungsstelle teilzunehmen.",
            ),
            BACK_HOME,
        ],
    }
}

fn privacy_policy_page() -> Page {
    use Block::{Heading, List, Paragraph, Subheading};

    Page {
        route: Route::PrivacyPolicy,
        title: "Datenschutzerklärung",
        call_to_action: None,
        blocks: vec![
            Heading("1. Verantwortliche Stelle"),
            Paragraph(
                "Strachwitz Consulting, António Freiherr von Strachwitz, Wüstenfelden 3, \
                 97355 Castell, Deutschland",
            ),
            Block::Link(PHONE),
            Block::Link(MAIL),
            Heading("2. Erhebung und Speicherung personenbezogener Daten"),
            Subheading("Beim Besuch der Website"),
            List(vec![
                "IP-Adresse des anfragenden Rechners",
                "Datum und Uhrzeit des Zugriffs",
                "Name und URL der abgerufenen Datei",
                "Website, von der aus der Zugriff erfolgt (Referrer-URL)",
                "Verwendeter Browser und ggf. Betriebssystem",
            ]),
            Paragraph("Rechtsgrundlage: Art. 6 Abs. 1 lit. f DSGVO."),
            Subheading("Bei Kontaktaufnahme per E-Mail"),
            Paragraph("Rechtsgrundlage: Art. 6 Abs. 1 lit. b DSGVO (vorvertragliche Maßnahmen)."),
            Heading("3. Weitergabe von Daten"),
            Paragraph(
                "Eine Weitergabe an Dritte erfolgt nur, wenn dies zur Vertragsabwicklung \
                 erforderlich ist oder Sie ausdrücklich eingewilligt haben.",
            ),
            Heading("4. Ihre Rechte"),
            Paragraph(
                "Auskunft (Art. 15 DSGVO), Berichtigung (Art. 16), Löschung (Art. 17), \
                 Einschränkung (Art. 18), Datenübertragbarkeit (Art. 20) sowie Widerspruch (Art. 21).",
            ),
            Heading("5. Beschwerderecht"),
            Paragraph(
                "Bayerisches Landesamt für Datenschutzaufsicht (BayLDA), Promenade 18, 91522 Ansbach.",
            ),
            Heading("6. Speicherdauer"),
            Paragraph(
                "Personenbezogene Daten werden gelöscht, sobald der Verarbeitungszweck entfällt \
                 oder Sie Ihre Einwilligung widerrufen.",
            ),
            Heading("7. SSL- bzw. TLS-Verschlüsselung"),
            Paragraph("Diese Seite nutzt aus Sicherheitsgründen eine SSL- bzw. TLS-Verschlüsselung."),
            BACK_HOME,
        ],
    }
}

fn cookie_policy_page() -> Page {
    use Block::{Heading, List, Paragraph};

    Page {
        route: Route::CookiePolicy,
        title: "Cookie- und Tracking-Hinweis",
        call_to_action: None,
        blocks: vec![
            Paragraph("(als Ergänzung zur Datenschutzerklärung)"),
            Heading("Cookies"),
            List(vec![
                "Notwendige Cookies (z. B. Session-ID, Spracheinstellungen)",
                "Statistik-Cookies (z. B. Google Analytics, Matomo)",
                "Marketing-Cookies (z. B. Facebook Pixel, LinkedIn Insight Tag)",
                "Funktionale Cookies (z. B. YouTube/Vimeo-Embeds, Google Maps, Chat-Widgets)",
            ]),
            Paragraph(
                "Technisch notwendige Cookies → Art. 6 Abs. 1 lit. f DSGVO; alle anderen Cookies → \
                 Art. 6 Abs. 1 lit. a DSGVO (Einwilligung via Cookie-Banner).",
            ),
            Heading("Cookie-Einwilligung"),
            Paragraph(
                "Beim ersten Besuch zeigen wir ein Cookie-Banner. Sie können Ihre Einwilligung \
                 jederzeit über „Cookie-Einstellungen“ am Seitenende widerrufen oder ändern.",
            ),
            Heading("Speicherdauer"),
            Paragraph(
                "Session-Cookies bis zum Schließen des Browsers; permanente Cookies zwischen \
                 1 Tag und 2 Jahren (je nach Tool).",
            ),
            Heading("Widerruf & Opt-Out"),
            Block::Link(Link::external("Google", "https://adssettings.google.com/")),
            Block::Link(Link::external(
                "Meta (Facebook/Instagram)",
                "https://www.facebook.com/settings?tab=ads",
            )),
            Block::Link(Link::external(
                "LinkedIn",
                "https://www.linkedin.com/psettings/advertising/",
            )),
            Heading("Wichtiger Hinweis"),
            Paragraph(
                "Diese Cookie-Information ergänzt unsere vollständige Datenschutzerklärung.",
            ),
            Block::Link(Link::internal("Datenschutzerklärung", "/Datenschutz")),
            BACK_HOME,
        ],
    }
}
