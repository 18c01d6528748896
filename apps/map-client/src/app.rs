use leptos::prelude::*;
use leptos_meta::*;
use viewer_core::{MapViewer, QueryParams, ViewerConfig};

use crate::fetch::BrowserFetcher;
use crate::location;
use crate::map::LeafletMap;

fn start_viewer(config: ViewerConfig) {
    let params = QueryParams::from_query(&location::current_search(), &config.defaults);
    let widget = match LeafletMap::mount(&config.container_id) {
        Ok(widget) => widget,
        Err(err) => {
            tracing::error!(error = %err, "map widget could not be created");
            return;
        }
    };

    let mut viewer = MapViewer::new(widget, config, params);
    leptos::task::spawn_local(async move {
        viewer.run(&BrowserFetcher).await;
    });
}

#[component]
pub fn MapPage() -> impl IntoView {
    let config = location::page_config();
    let container_id = config.container_id.clone();

    // the container has to be in the DOM before Leaflet binds to it
    Effect::new(move |_| {
        start_viewer(config.clone());
    });

    view! {
        <div id=container_id style="position: absolute; inset: 0;"></div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Job Output Map" />
        <MapPage />
    }
}
