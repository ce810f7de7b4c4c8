use crate::api::ApiError;
use leptos::logging::warn;
use leptos::*;
use serde::Deserialize;
use wasm_bindgen::JsValue;

const GEO_ENDPOINT: &str = "https://ipapi.co/json/";

/// What the IP geolocation provider reports. Every field is optional as
/// far as this client is concerned; the provider is untrusted input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoReport {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
}

/// One way of figuring out where the visitor is. Strategies are tried in
/// the order of `FALLBACK_CHAIN` until one succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    IpGeolocation,
    LocaleTimezone,
}

const FALLBACK_CHAIN: [Strategy; 2] = [Strategy::IpGeolocation, Strategy::LocaleTimezone];

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub label: String,
    pub tooltip: Option<String>,
}

/// Builds the flag emoji for a two-letter country code out of regional
/// indicator code points. Anything that is not two ASCII letters yields
/// no emoji rather than garbage.
pub fn flag_emoji(country_code: &str) -> Option<String> {
    let code = country_code.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    code.chars()
        .map(|c| char::from_u32(0x1F1E6 + (c.to_ascii_uppercase() as u32 - 'A' as u32)))
        .collect()
}

/// "City, Region, Country" with whatever pieces the provider managed to
/// fill in, prefixed with the country flag when the code is usable.
fn format_geo(report: &GeoReport) -> String {
    let place = match (&report.city, &report.region, &report.country_name) {
        (Some(city), Some(region), Some(country)) => format!("{city}, {region}, {country}"),
        (Some(city), None, Some(country)) => format!("{city}, {country}"),
        (_, _, Some(country)) => country.clone(),
        _ => match &report.country_code {
            Some(code) => code.clone(),
            None => return "Location unknown".to_string(),
        },
    };
    match report.country_code.as_deref().and_then(flag_emoji) {
        Some(flag) => format!("{flag} {place}"),
        None => place,
    }
}

fn geo_tooltip(report: &GeoReport) -> Option<String> {
    report.timezone.as_ref().map(|timezone| {
        let ip = report.ip.as_deref().unwrap_or("Unknown");
        format!("Timezone: {timezone}\nIP: {ip}")
    })
}

/// The browser's resolved IANA timezone, via the JS `Intl` API.
fn locale_timezone() -> Option<String> {
    let format = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &js_sys::Object::new());
    js_sys::Reflect::get(&format.resolved_options(), &JsValue::from_str("timeZone"))
        .ok()
        .and_then(|value| value.as_string())
}

async fn try_strategy(
    strategy: Strategy,
    http: &reqwest::Client,
) -> Result<ResolvedLocation, ApiError> {
    match strategy {
        Strategy::IpGeolocation => {
            let body = http
                .get(GEO_ENDPOINT)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            let report: GeoReport = serde_json::from_str(&body)
                .map_err(|err| ApiError::Transport(format!("invalid response body: {err}")))?;
            Ok(ResolvedLocation {
                label: format_geo(&report),
                tooltip: geo_tooltip(&report),
            })
        }
        Strategy::LocaleTimezone => locale_timezone()
            .map(|timezone| ResolvedLocation {
                label: format!("Timezone: {timezone}"),
                tooltip: None,
            })
            .ok_or_else(|| ApiError::Transport("locale timezone unavailable".to_string())),
    }
}

/// Walks the fallback chain until a strategy succeeds. Failures are logged
/// and never surfaced to the visitor beyond the final placeholder text.
pub async fn detect_location(http: &reqwest::Client) -> ResolvedLocation {
    for strategy in FALLBACK_CHAIN {
        match try_strategy(strategy, http).await {
            Ok(resolved) => return resolved,
            Err(err) => warn!("Location strategy {strategy:?} failed: {err}"),
        }
    }
    ResolvedLocation {
        label: "Location unavailable".to_string(),
        tooltip: None,
    }
}

#[component]
pub fn LocationBadge(http: reqwest::Client) -> impl IntoView {
    let (location, set_location) = create_signal(None::<ResolvedLocation>);

    spawn_local(async move {
        set_location.set(Some(detect_location(&http).await));
    });

    view! {
        <span
            class="text-sm font-medium text-gray-700 dark:text-gray-300"
            title=move || location.get().and_then(|resolved| resolved.tooltip)
        >
            {move || {
                location
                    .get()
                    .map(|resolved| resolved.label)
                    .unwrap_or_else(|| "Detecting location...".to_string())
            }}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(
        city: Option<&str>,
        region: Option<&str>,
        country_name: Option<&str>,
        country_code: Option<&str>,
    ) -> GeoReport {
        GeoReport {
            city: city.map(str::to_string),
            region: region.map(str::to_string),
            country_name: country_name.map(str::to_string),
            country_code: country_code.map(str::to_string),
            ..GeoReport::default()
        }
    }

    #[test]
    fn flag_for_two_letter_codes() {
        assert_eq!(flag_emoji("US").as_deref(), Some("\u{1F1FA}\u{1F1F8}"));
        assert_eq!(flag_emoji("de").as_deref(), Some("\u{1F1E9}\u{1F1EA}"));
    }

    #[test]
    fn no_flag_for_unusable_codes() {
        assert_eq!(flag_emoji(""), None);
        assert_eq!(flag_emoji("USA"), None);
        assert_eq!(flag_emoji("1!"), None);
    }

    #[test]
    fn full_report_formats_city_region_country() {
        let report = report(Some("Berlin"), Some("Berlin"), Some("Germany"), Some("DE"));
        assert_eq!(format_geo(&report), "\u{1F1E9}\u{1F1EA} Berlin, Berlin, Germany");
    }

    #[test]
    fn formatting_degrades_field_by_field() {
        assert_eq!(
            format_geo(&report(Some("Lagos"), None, Some("Nigeria"), None)),
            "Lagos, Nigeria"
        );
        assert_eq!(
            format_geo(&report(None, Some("Lagos State"), Some("Nigeria"), None)),
            "Nigeria"
        );
        assert_eq!(format_geo(&report(None, None, None, Some("NG"))), "\u{1F1F3}\u{1F1EC} NG");
        assert_eq!(format_geo(&report(None, None, None, None)), "Location unknown");
    }

    #[test]
    fn provider_json_decodes_with_missing_fields() {
        let body = r#"{"city": "Singapore", "country_name": "Singapore", "country_code": "SG"}"#;
        let report: GeoReport = serde_json::from_str(body).unwrap();
        assert_eq!(report.city.as_deref(), Some("Singapore"));
        assert_eq!(report.region, None);
        assert_eq!(report.timezone, None);
    }

    #[test]
    fn tooltip_needs_a_timezone() {
        let mut report = report(None, None, None, None);
        assert_eq!(geo_tooltip(&report), None);

        report.timezone = Some("Asia/Singapore".to_string());
        assert_eq!(
            geo_tooltip(&report).as_deref(),
            Some("Timezone: Asia/Singapore\nIP: Unknown")
        );

        report.ip = Some("203.0.113.9".to_string());
        assert_eq!(
            geo_tooltip(&report).as_deref(),
            Some("Timezone: Asia/Singapore\nIP: 203.0.113.9")
        );
    }

    #[test]
    fn chain_tries_the_provider_first() {
        assert_eq!(
            FALLBACK_CHAIN,
            [Strategy::IpGeolocation, Strategy::LocaleTimezone]
        );
    }
}
