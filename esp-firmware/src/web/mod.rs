// Web-Modul für die Steuerseite
// Die REST-Routen selbst liegen in esp-core (api) und tasks/http.rs

// HTML-Datei zur Compile-Zeit einbinden
// Die Datei wird direkt ins Binary eingebettet
pub const INDEX_HTML: &str = include_str!("index.html");
