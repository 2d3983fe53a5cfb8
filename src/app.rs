use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::core::guard::View;
use crate::ui::pages::{
    CatalogPage, CoursePage, CreateCoursePage, CreateUserPage, DashboardPage, ForgotPasswordPage,
    HomePage, LoginPage, MyCoursesPage, NotFoundPage, ProfilePage, RegisterPage, ReportsPage,
    ResetPasswordPage, UsersPage,
};
use crate::ui::{Guarded, provide_session_context};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    provide_session_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/lms-portal.css"/>

        <Title text="LMS Portal"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                // Public
                <Route path=path!("/") view=HomePage/>
                <Route path=path!("/forgot-password") view=ForgotPasswordPage/>
                <Route path=path!("/reset-password") view=ResetPasswordPage/>
                <Route path=path!("/courses") view=|| view! { <CatalogPage/> }/>
                <Route path=path!("/courses/:id") view=|| view! { <CoursePage/> }/>

                // Guests only
                <Route
                    path=path!("/login")
                    view=|| view! { <Guarded target=View::Login><LoginPage/></Guarded> }
                />
                <Route
                    path=path!("/register")
                    view=|| view! { <Guarded target=View::Register><RegisterPage/></Guarded> }
                />

                // Logged in, filtered by role
                <Route
                    path=path!("/dashboard")
                    view=|| view! { <Guarded target=View::Dashboard><DashboardPage/></Guarded> }
                />
                <Route
                    path=path!("/dashboard/courses")
                    view=|| view! { <Guarded target=View::BrowseCourses><CatalogPage in_dashboard=true/></Guarded> }
                />
                <Route
                    path=path!("/dashboard/courses/:id")
                    view=|| view! { <Guarded target=View::CourseDetail><CoursePage in_dashboard=true/></Guarded> }
                />
                <Route
                    path=path!("/create-course")
                    view=|| view! { <Guarded target=View::CreateCourse><CreateCoursePage/></Guarded> }
                />
                <Route
                    path=path!("/create-instructor")
                    view=|| view! { <Guarded target=View::CreateUser><CreateUserPage/></Guarded> }
                />
                <Route
                    path=path!("/my-courses")
                    view=|| view! { <Guarded target=View::MyCourses><MyCoursesPage/></Guarded> }
                />
                <Route
                    path=path!("/users")
                    view=|| view! { <Guarded target=View::Users><UsersPage/></Guarded> }
                />
                <Route
                    path=path!("/reports")
                    view=|| view! { <Guarded target=View::Reports><ReportsPage/></Guarded> }
                />
                <Route
                    path=path!("/profile")
                    view=|| view! { <Guarded target=View::Profile><ProfilePage/></Guarded> }
                />
            </Routes>
        </Router>
    }
}
