//! Server-side HTML rendering of the listing page.
//!
//! The filter panel is a GET form targeting `/`, so submitting it produces a new query string and
//! the server answers with the reconciled page. Every interactive control and every card field
//! carries a stable `data-testid` attribute.

use doclist_core::{query, ConsultationMode, DoctorRecord, ListingPage, SortDirection};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;background:#f5f5f5;margin:0}\
main{max-width:1200px;margin:0 auto;padding:32px 16px}\
.layout{display:flex;gap:16px;align-items:flex-start}\
.filters{width:25%;position:sticky;top:20px;background:#fff;padding:16px;border-radius:4px}\
.results{width:75%}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(240px,1fr));gap:16px}\
.card{background:#fff;border-radius:4px;padding:16px;display:flex;flex-direction:column}\
.card img{width:100%;height:200px;object-fit:cover}\
.badge{display:inline-block;font-size:12px;padding:2px 8px;border-radius:12px;background:#e0e0e0}\
.badge.video{background:#1976d2;color:#fff}\
.meta{display:flex;justify-content:space-between;margin-top:auto}\
fieldset{border:0;padding:0;margin:0 0 24px}\
#search{width:100%;padding:12px;font-size:16px;box-sizing:border-box}\
@media (max-width:720px){.layout{flex-direction:column}.filters,.results{width:100%;position:static}}";

/// Render the complete listing page.
pub fn listing_page(page: &ListingPage<'_>) -> String {
    let mut out = String::with_capacity(16 * 1024);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if page.is_loading() {
        out.push_str("<meta http-equiv=\"refresh\" content=\"2\">\n");
    }
    out.push_str("<title>Find a doctor</title>\n");
    out.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n<main>\n"));
    out.push_str("<form method=\"get\" action=\"/\" onchange=\"this.submit()\">\n");

    search_bar(&mut out, page);

    out.push_str("<div class=\"layout\">\n<aside class=\"filters\">\n");
    filter_panel(&mut out, page);
    out.push_str("<noscript><button type=\"submit\">Apply</button></noscript>\n");
    out.push_str("</aside>\n<section class=\"results\">\n");
    doctor_list(&mut out, page);
    out.push_str("</section>\n</div>\n</form>\n</main>\n</body>\n</html>\n");

    out
}

fn search_bar(out: &mut String, page: &ListingPage<'_>) {
    out.push_str(&format!(
        "<div class=\"search\">\n<input id=\"search\" type=\"search\" name=\"search\" \
         placeholder=\"Search for doctors\" autocomplete=\"off\" value=\"{}\" \
         data-testid=\"autocomplete-input\">\n",
        escape(&page.filters().search_query)
    ));

    let suggestions = page.suggestions();
    if !suggestions.is_empty() {
        out.push_str("<ul class=\"suggestions\">\n");
        for doctor in suggestions {
            let filters = page.filters().clone().with_search_query(doctor.name.clone());
            out.push_str(&format!(
                "<li data-testid=\"suggestion-item\"><a href=\"{}\">{}</a></li>\n",
                escape(&query::location(&filters)),
                escape(&doctor.name)
            ));
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</div>\n");
}

fn filter_panel(out: &mut String, page: &ListingPage<'_>) {
    let filters = page.filters();

    out.push_str("<fieldset>\n<legend data-testid=\"filter-header-moc\">Consultation Mode</legend>\n");
    radio(out, "consultationType", "", "All", filters.consultation_type.is_none(), None);
    for mode in ConsultationMode::ALL {
        let test_id = match mode {
            ConsultationMode::VideoConsult => "filter-video-consult",
            ConsultationMode::InClinic => "filter-in-clinic",
        };
        radio(
            out,
            "consultationType",
            mode.label(),
            mode.label(),
            filters.consultation_type == Some(mode),
            Some(test_id),
        );
    }
    out.push_str("</fieldset>\n");

    out.push_str("<fieldset>\n<legend data-testid=\"filter-header-speciality\">Specialties</legend>\n");
    for specialty in page.specialty_facets() {
        let checked = if filters.specialties.contains(specialty) {
            " checked"
        } else {
            ""
        };
        out.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"specialties\" value=\"{value}\"{checked} \
             data-testid=\"filter-specialty-{test_id}\"> {value}</label><br>\n",
            value = escape(specialty),
            test_id = escape(&specialty_test_id(specialty)),
        ));
    }
    out.push_str("</fieldset>\n");

    out.push_str("<fieldset>\n<legend data-testid=\"filter-header-sort\">Sort by Fees</legend>\n");
    sort_group(out, "feesSort", filters.fees_sort, Some("sort-fees"), None);
    out.push_str("</fieldset>\n");

    out.push_str("<fieldset>\n<legend>Sort by Experience</legend>\n");
    sort_group(out, "experienceSort", filters.experience_sort, None, Some("sort-experience"));
    out.push_str("</fieldset>\n");
}

fn sort_group(
    out: &mut String,
    name: &str,
    current: Option<SortDirection>,
    asc_test_id: Option<&str>,
    desc_test_id: Option<&str>,
) {
    radio(out, name, "", "None", current.is_none(), None);
    radio(
        out,
        name,
        SortDirection::Asc.as_str(),
        "Low to High",
        current == Some(SortDirection::Asc),
        asc_test_id,
    );
    radio(
        out,
        name,
        SortDirection::Desc.as_str(),
        "High to Low",
        current == Some(SortDirection::Desc),
        desc_test_id,
    );
}

fn radio(
    out: &mut String,
    name: &str,
    value: &str,
    label: &str,
    checked: bool,
    test_id: Option<&str>,
) {
    out.push_str(&format!(
        "<label><input type=\"radio\" name=\"{name}\" value=\"{value}\"{checked}{test_id}> {label}</label><br>\n",
        value = escape(value),
        checked = if checked { " checked" } else { "" },
        test_id = test_id
            .map(|id| format!(" data-testid=\"{id}\""))
            .unwrap_or_default(),
        label = escape(label),
    ));
}

fn doctor_list(out: &mut String, page: &ListingPage<'_>) {
    if page.is_loading() {
        out.push_str("<p class=\"loading\" data-testid=\"loading\">Loading doctors…</p>\n");
        return;
    }

    if page.view().is_empty() {
        out.push_str("<p>No doctors found matching your criteria.</p>\n");
        return;
    }

    out.push_str("<div class=\"grid\">\n");
    for doctor in page.view() {
        doctor_card(out, doctor);
    }
    out.push_str("</div>\n");
}

fn doctor_card(out: &mut String, doctor: &DoctorRecord) {
    out.push_str(&format!(
        "<article class=\"card\" data-testid=\"doctor-card\" id=\"doctor-{}\">\n",
        escape(&doctor.id)
    ));
    if !doctor.photo.is_empty() {
        out.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">\n",
            escape(&doctor.photo),
            escape(&doctor.name)
        ));
    }
    out.push_str(&format!(
        "<h2 data-testid=\"doctor-name\">{}</h2>\n",
        escape(&doctor.name)
    ));
    out.push_str(&format!(
        "<p data-testid=\"doctor-specialty\">{}</p>\n",
        escape(&doctor.specialities.join(", "))
    ));
    out.push_str(&format!(
        "<p data-testid=\"doctor-languages\">Languages: {}</p>\n",
        escape(&doctor.languages.join(", "))
    ));

    let clinic = [&doctor.clinic.name, &doctor.clinic.address.locality]
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if !clinic.is_empty() {
        out.push_str(&format!("<p class=\"clinic\">{}</p>\n", escape(&clinic)));
    }

    out.push_str("<div class=\"badges\">");
    if doctor.video_consult {
        out.push_str("<span class=\"badge video\">Video Consult</span> ");
    }
    if doctor.in_clinic {
        out.push_str("<span class=\"badge\">In Clinic</span>");
    }
    out.push_str("</div>\n");

    out.push_str(&format!(
        "<div class=\"meta\"><span data-testid=\"doctor-experience\">Experience: {}</span>\
         <span data-testid=\"doctor-fee\">Fee: {}</span></div>\n</article>\n",
        escape(&doctor.experience),
        escape(&doctor.fees)
    ));
}

/// Test id suffix for a specialty checkbox: each whitespace run becomes a single `-`.
pub fn specialty_test_id(specialty: &str) -> String {
    let mut id = String::with_capacity(specialty.len());
    let mut in_whitespace = false;
    for c in specialty.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                id.push('-');
            }
            in_whitespace = true;
        } else {
            id.push(c);
            in_whitespace = false;
        }
    }
    id
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
