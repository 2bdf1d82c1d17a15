use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::config::AppConfig;

/// Display label for a material value: `Fish_Farmed` reads "Fish (Farmed)".
pub fn material_label(value: &str) -> String {
    match value.split_once('_') {
        Some((base, variant)) => format!("{} ({})", base, variant),
        None => value.to_string(),
    }
}

/// The `#material` select, filled from the service's material catalog.
#[component]
pub fn MaterialSelect(
    /// The selected material; empty until the user picks one.
    value: ReadSignal<String>,
    on_select: WriteSignal<String>,
) -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let (materials, set_materials) = signal(api::fallback_materials());

    Effect::new(move |_| {
        let config = config.clone();
        spawn_local(async move {
            set_materials.set(api::fetch_materials(&config).await);
        });
    });

    view! {
        <select
            id="material"
            name="material"
            class="input input-select"
            prop:value=move || value.get()
            on:change=move |ev| on_select.set(event_target_value(&ev))
        >
            <option value="">"Select a material"</option>
            <For
                each=move || materials.get()
                key=|m| m.clone()
                children=move |m| {
                    let label = material_label(&m);
                    view! { <option value=m>{label}</option> }
                }
            />
        </select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_label() {
        assert_eq!(material_label("Cotton"), "Cotton");
        assert_eq!(material_label("Fish_Farmed"), "Fish (Farmed)");
    }
}
