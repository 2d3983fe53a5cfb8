//! 404 page

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::guard::View;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-slate-50 flex flex-col items-center justify-center p-4 text-center">
            <h1 class="text-6xl font-bold text-slate-900 mb-4">"404"</h1>
            <h2 class="text-2xl font-semibold text-slate-900 mb-2">"Page Not Found"</h2>
            <p class="text-slate-500 mb-8 max-w-md">
                "The page you're looking for doesn't exist or has been moved."
            </p>
            <div class="flex gap-4">
                <A href=View::Home.path() attr:class="px-6 py-3 bg-indigo-600 hover:bg-indigo-700 text-white font-medium rounded-lg">
                    "Go Home"
                </A>
                <A href=View::Catalog.path() attr:class="px-6 py-3 border border-slate-300 text-slate-700 font-medium rounded-lg hover:bg-slate-100">
                    "Browse Courses"
                </A>
            </div>
        </div>
    }
}
