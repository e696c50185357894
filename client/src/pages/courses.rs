//! Public course catalog and course detail.

#[cfg(test)]
#[path = "courses_test.rs"]
mod courses_test;

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Course {
    pub id: &'static str,
    pub title: &'static str,
    pub instructor: &'static str,
    pub summary: &'static str,
}

pub const CATALOG: &[Course] = &[
    Course {
        id: "rust-fundamentals",
        title: "Rust Fundamentals",
        instructor: "Maya Chen",
        summary: "Ownership, borrowing and the type system from first principles.",
    },
    Course {
        id: "web-accessibility",
        title: "Accessible Web Interfaces",
        instructor: "Daniel Osei",
        summary: "Build interfaces that work with keyboards and screen readers.",
    },
    Course {
        id: "data-storytelling",
        title: "Data Storytelling",
        instructor: "Inès Laurent",
        summary: "Turn spreadsheets into arguments people remember.",
    },
];

/// Catalog entry with `id`, compared case-insensitively.
pub fn find_course(id: &str) -> Option<&'static Course> {
    CATALOG.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}

#[component]
pub fn CoursesPage() -> impl IntoView {
    view! {
        <div class="courses-page">
            <h1>"Courses"</h1>
            <ul class="course-list">
                {CATALOG
                    .iter()
                    .map(|course| {
                        view! {
                            <li class="course-card">
                                <a href=format!("/courses/{}", course.id)>
                                    <h2>{course.title}</h2>
                                </a>
                                <p class="course-card__instructor">{course.instructor}</p>
                                <p>{course.summary}</p>
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()}
            </ul>
        </div>
    }
}

#[component]
pub fn CourseDetailPage(course_id: String) -> impl IntoView {
    match find_course(&course_id) {
        Some(course) => view! {
            <article class="course-detail">
                <h1>{course.title}</h1>
                <p class="course-detail__instructor">"Taught by " {course.instructor}</p>
                <p>{course.summary}</p>
                <a href="/account-type" class="btn btn--primary">"Enroll"</a>
            </article>
        }
        .into_any(),
        None => view! {
            <div class="course-detail course-detail--missing">
                <h1>"Course not found"</h1>
                <a href="/courses" class="btn">"Back to courses"</a>
            </div>
        }
        .into_any(),
    }
}
