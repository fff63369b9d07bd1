use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{entities::movie, models::Candidate};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON: &str = "rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn list_page(movies: &[movie::Model]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="max-w-4xl mx-auto px-6 py-12" {
                div class="flex items-start justify-between gap-6" {
                    div {
                        h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                        p class="mt-2 text-gray-600" { "Ranked by rating, oldest first on ties." }
                    }
                    a class=(BUTTON) href="/add" { "Add Movie" }
                }

                @if movies.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "No movies yet." }
                    }
                } @else {
                    div class="mt-10 space-y-4" {
                        @for m in movies {
                            (movie_card(m))
                        }
                    }
                }
            }
        },
    )
}

fn movie_card(m: &movie::Model) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-6" {
            img class="w-24 rounded" src=(m.img_url) alt=(m.title);
            div class="flex-1" {
                h2 class="text-xl font-semibold text-gray-900" {
                    @if let Some(rank) = m.ranking {
                        span class="mr-2 text-gray-400" { "#" (rank) }
                    }
                    (m.title)
                    span class="ml-2 font-normal text-gray-500" { "(" (m.year) ")" }
                }
                p class="mt-1 text-sm font-medium text-gray-700" {
                    @match m.rating {
                        Some(rating) => { "Rating: " (format!("{rating:.1}")) }
                        None => { "Not rated yet" }
                    }
                }
                @if let Some(review) = &m.review {
                    p class="mt-2 italic text-gray-700" { "\u{201c}" (review) "\u{201d}" }
                }
                p class="mt-2 text-sm text-gray-600" { (m.description) }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/edit?id={}", m.id)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(format!("/delete?id={}", m.id)) { "Delete" }
                }
            }
        }
    }
}

pub fn add_page() -> String {
    page(
        "Add Movie",
        card(html! {
            h1 class="text-2xl font-bold text-gray-900" { "Add a Movie" }
            form class="mt-6 space-y-6" method="post" action="/add" {
                div {
                    label class="block text-sm font-medium text-gray-700" for="title" { "Movie Title" }
                    input class=(INPUT) name="title" id="title" required;
                }
                button class=(BUTTON) type="submit" { "Add" }
            }
        }),
    )
}

pub fn select_page(query: &str, candidates: &[Candidate]) -> String {
    page(
        "Select Movie",
        card(html! {
            h1 class="text-2xl font-bold text-gray-900" { "Select Movie" }
            p class="mt-2 text-gray-600" { "Results for \u{201c}" (query) "\u{201d}" }
            @if candidates.is_empty() {
                p class="mt-6 text-gray-600" { "Nothing matched." }
            } @else {
                ul class="mt-6 space-y-2" {
                    @for c in candidates {
                        li {
                            a class="text-blue-600 hover:text-blue-800" href=(format!("/select?id={}", c.id)) {
                                (c.title)
                                @if let Some(date) = c.release_date.as_deref().filter(|d| !d.is_empty()) {
                                    span class="ml-2 text-gray-500" { "- " (date) }
                                }
                            }
                        }
                    }
                }
            }
            a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/add" { "New search" }
        }),
    )
}

pub fn edit_page(m: &movie::Model) -> String {
    page(
        "Edit Movie",
        card(html! {
            h1 class="text-2xl font-bold text-gray-900" { (m.title) }
            p class="mt-2 text-gray-600" { "Edit movie rating" }
            form class="mt-6 space-y-6" method="post" action=(format!("/edit?id={}", m.id)) {
                div {
                    label class="block text-sm font-medium text-gray-700" for="rating" { "Your rating out of 10, e.g. 7.5" }
                    input class=(INPUT) name="rating" id="rating" type="number" step="any" required
                        value=[m.rating];
                }
                div {
                    label class="block text-sm font-medium text-gray-700" for="review" { "Your review" }
                    input class=(INPUT) name="review" id="review" required value=[m.review.as_deref()];
                }
                button class=(BUTTON) type="submit" { "Done" }
            }
        }),
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    page(
        "Error",
        card(html! {
            h1 class="text-2xl font-bold text-gray-900" { "Error " (status.as_u16()) }
            p class="mt-4 text-gray-700" { (message) }
            a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
        }),
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" { (body) }
        }
    }
    .into_string()
}

fn card(inner: Markup) -> Markup {
    html! {
        div class="max-w-xl mx-auto px-6 py-12" {
            div class="bg-white shadow rounded-lg p-8" { (inner) }
        }
    }
}
