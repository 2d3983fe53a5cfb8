//! Course catalog, course page, course creation and "my courses"

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use super::{BUTTON_CLASS, FormMessage, INPUT_CLASS, Loading, course_id_param, settle};
use crate::core::guard::View;
use crate::core::lms::{CourseDetail, CourseSummary, MyCourses, NewCourse};
use crate::core::session::Role;
use crate::ui::session_context::use_session_context;
use crate::ui::sidebar::DashboardLayout;

#[component]
fn CourseCard(course: CourseSummary, link: View) -> impl IntoView {
    let href = link.href_with_id(course.id);
    view! {
        <A href=href attr:class="block bg-white rounded-xl shadow p-5 hover:shadow-md transition-shadow">
            <h3 class="font-semibold text-slate-900">{course.title}</h3>
            <p class="mt-1 text-sm text-slate-500 line-clamp-2">{course.description}</p>
            <div class="mt-3 flex justify-between text-xs text-slate-400">
                <span>{course.category_name.unwrap_or_default()}</span>
                <span>{format!("{} enrolled", course.enrollments_count)}</span>
            </div>
        </A>
    }
}

#[component]
fn CourseGrid(courses: Vec<CourseSummary>, link: View) -> impl IntoView {
    if courses.is_empty() {
        return view! { <p class="text-slate-500">"No courses yet."</p> }.into_any();
    }
    view! {
        <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
            {courses
                .into_iter()
                .map(|course| view! { <CourseCard course=course link=link/> })
                .collect_view()}
        </div>
    }
    .into_any()
}

/// Course list with a category filter. Public at `/courses`, inside the
/// dashboard at `/dashboard/courses`.
#[component]
pub fn CatalogPage(#[prop(optional)] in_dashboard: bool) -> impl IntoView {
    let session = use_session_context();
    let category = RwSignal::new(None::<u64>);

    let courses = LocalResource::new(move || async move {
        let client = session.client();
        settle(session, client.courses()).await
    });
    let categories = LocalResource::new(move || async move {
        let client = session.client();
        settle(session, client.categories()).await.unwrap_or_default()
    });

    let link = if in_dashboard {
        View::CourseDetail
    } else {
        View::CatalogCourse
    };

    let filter = move || {
        view! {
            <select
                class="mb-6 px-3 py-2 border border-slate-300 rounded-lg"
                on:change=move |ev| category.set(event_target_value(&ev).parse().ok())
            >
                <option value="">"All categories"</option>
                {move || {
                    categories
                        .get()
                        .unwrap_or_default()
                        .into_iter()
                        .map(|c| view! { <option value=c.id.to_string()>{c.name}</option> })
                        .collect_view()
                }}
            </select>
        }
    };

    let grid = move || match courses.get() {
        None => view! { <Loading/> }.into_any(),
        Some(None) => view! { <p class="text-slate-500">"Courses could not be loaded."</p> }.into_any(),
        Some(Some(list)) => {
            let selected = category.get();
            let list: Vec<CourseSummary> = list
                .into_iter()
                .filter(|c| selected.is_none() || c.category == selected)
                .collect();
            view! { <CourseGrid courses=list link=link/> }.into_any()
        }
    };

    if in_dashboard {
        view! {
            <DashboardLayout title="All Courses">
                {filter}
                <Suspense fallback=|| view! { <Loading/> }>{grid}</Suspense>
            </DashboardLayout>
        }
        .into_any()
    } else {
        view! {
            <div class="min-h-screen bg-slate-50 p-8 max-w-6xl mx-auto">
                <h1 class="text-3xl font-bold text-slate-900 mb-6">"Course Catalog"</h1>
                {filter}
                <Suspense fallback=|| view! { <Loading/> }>{grid}</Suspense>
            </div>
        }
        .into_any()
    }
}

/// Course page. Inside the dashboard it shows enrollment status and lets
/// students join or leave.
#[component]
pub fn CoursePage(#[prop(optional)] in_dashboard: bool) -> impl IntoView {
    let session = use_session_context();
    let course_id = course_id_param();
    let busy = RwSignal::new(false);

    let course = LocalResource::new(move || {
        let id = course_id.get();
        async move {
            let id = id?;
            let client = session.client();
            if in_dashboard {
                settle(session, client.course_for_user(id)).await
            } else {
                settle(session, client.course(id)).await
            }
        }
    });

    let toggle_enrollment = move |detail: CourseDetail| {
        busy.set(true);
        spawn_local(async move {
            let client = session.client();
            let call = async {
                if detail.is_enrolled {
                    client.unenroll(detail.id).await
                } else {
                    client.enroll(detail.id).await
                }
            };
            let done = settle(session, call).await.is_some();
            busy.set(false);
            if done {
                course.refetch();
            }
        });
    };

    let body = move || match course.get() {
        None => view! { <Loading/> }.into_any(),
        Some(None) => view! { <p class="text-slate-500">"Course not available."</p> }.into_any(),
        Some(Some(detail)) => {
            let is_student = session
                .identity()
                .is_some_and(|identity| identity.role == Role::Student);
            let action = (in_dashboard && is_student).then(|| {
                let label = if detail.is_enrolled { "Leave Course" } else { "Enroll" };
                let target = detail.clone();
                view! {
                    <button
                        class=BUTTON_CLASS
                        disabled=move || busy.get()
                        on:click=move |_| toggle_enrollment(target.clone())
                    >
                        {label}
                    </button>
                }
            });
            view! {
                <article class="bg-white rounded-xl shadow p-6 space-y-4">
                    <h2 class="text-2xl font-semibold text-slate-900">{detail.title.clone()}</h2>
                    <p class="text-slate-600 whitespace-pre-line">{detail.description.clone()}</p>
                    <dl class="grid grid-cols-2 gap-2 text-sm">
                        <dt class="text-slate-400">"Category"</dt>
                        <dd>{detail.category.as_ref().map(|c| c.name.clone()).unwrap_or_default()}</dd>
                        <dt class="text-slate-400">"Instructor"</dt>
                        <dd>{detail.instructor.as_ref().map(|i| i.full_name.clone()).unwrap_or_default()}</dd>
                        <dt class="text-slate-400">"Students"</dt>
                        <dd>{detail.enrollments_count}</dd>
                    </dl>
                    {action}
                </article>
            }
            .into_any()
        }
    };

    if in_dashboard {
        view! {
            <DashboardLayout title="Course">
                <Suspense fallback=|| view! { <Loading/> }>{body}</Suspense>
            </DashboardLayout>
        }
        .into_any()
    } else {
        view! {
            <div class="min-h-screen bg-slate-50 p-8 max-w-3xl mx-auto space-y-4">
                <A href=View::Catalog.path() attr:class="text-sm text-indigo-600">"All courses"</A>
                <Suspense fallback=|| view! { <Loading/> }>{body}</Suspense>
                <p class="text-sm text-slate-500">
                    <A href=View::Login.path() attr:class="text-indigo-600">"Sign in"</A>
                    " to enroll."
                </p>
            </div>
        }
        .into_any()
    }
}

#[component]
pub fn CreateCoursePage() -> impl IntoView {
    let session = use_session_context();
    let navigate = use_navigate();

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let category = RwSignal::new(None::<u64>);
    let error = RwSignal::new(None::<String>);

    let categories = LocalResource::new(move || async move {
        let client = session.client();
        settle(session, client.categories()).await.unwrap_or_default()
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        error.set(None);

        let Some(category) = category.get_untracked() else {
            error.set(Some("Choose a category".to_string()));
            return;
        };
        let course = NewCourse {
            title: title.get_untracked(),
            description: description.get_untracked(),
            category,
        };
        let navigate = navigate.clone();
        spawn_local(async move {
            let client = session.client();
            match client.create_course(&course).await {
                Ok(created) => navigate(
                    &View::CourseDetail.href_with_id(created.id),
                    Default::default(),
                ),
                Err(e) if e.requires_login() => session.report(&e),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <DashboardLayout title="Create Course">
            <form on:submit=on_submit class="max-w-xl space-y-4 bg-white rounded-xl shadow p-6">
                <FormMessage message=error/>
                <input
                    type="text"
                    placeholder="Course title"
                    class=INPUT_CLASS
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <textarea
                    rows="5"
                    placeholder="Description"
                    class=INPUT_CLASS
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                ></textarea>
                <select
                    class=INPUT_CLASS
                    on:change=move |ev| category.set(event_target_value(&ev).parse().ok())
                >
                    <option value="">"Select a category"</option>
                    {move || {
                        categories
                            .get()
                            .unwrap_or_default()
                            .into_iter()
                            .map(|c| view! { <option value=c.id.to_string()>{c.name}</option> })
                            .collect_view()
                    }}
                </select>
                <button type="submit" class=BUTTON_CLASS>"Create Course"</button>
            </form>
        </DashboardLayout>
    }
}

#[component]
pub fn MyCoursesPage() -> impl IntoView {
    let session = use_session_context();

    let courses = LocalResource::new(move || async move {
        let client = session.client();
        settle(session, client.my_courses()).await
    });

    let body = move || match courses.get() {
        None => view! { <Loading/> }.into_any(),
        Some(None) => ().into_any(),
        Some(Some(MyCourses::Enrolled(enrollments))) => {
            let list: Vec<CourseSummary> = enrollments.into_iter().map(|e| e.course).collect();
            view! { <CourseGrid courses=list link=View::CourseDetail/> }.into_any()
        }
        Some(Some(MyCourses::Teaching(list))) => {
            view! { <CourseGrid courses=list link=View::CourseDetail/> }.into_any()
        }
    };

    view! {
        <DashboardLayout title="My Courses">
            <Suspense fallback=|| view! { <Loading/> }>{body}</Suspense>
        </DashboardLayout>
    }
}
