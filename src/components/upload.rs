use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, info, warn};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

use crate::error::LoadError;
use crate::table::{Table, load_table};

/// A parsed upload together with its file name.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedFile {
	pub name: String,
	pub table: Table,
}

/// Numbers uploads so that only the most recent one is reported.
#[derive(Clone, Copy, Debug, Default)]
struct UploadSequence {
	latest: u64,
}

impl UploadSequence {
	fn issue(&mut self) -> u64 {
		self.latest += 1;
		self.latest
	}

	fn is_latest(&self, ticket: u64) -> bool {
		ticket == self.latest
	}
}

async fn read_bytes(file: &File) -> Result<Vec<u8>, LoadError> {
	let buffer = JsFuture::from(file.array_buffer())
		.await
		.map_err(|e| LoadError::Read(format!("{e:?}")))?;
	Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

async fn load_file(file: File) -> Result<LoadedFile, LoadError> {
	let name = file.name();
	let bytes = read_bytes(&file).await?;
	let table = load_table(&name, &bytes)?;
	Ok(LoadedFile { name, table })
}

/// File picker that parses the chosen spreadsheet and reports the outcome.
#[component]
pub fn FileUpload(
	#[prop(into)] on_load: Callback<Result<LoadedFile, LoadError>>,
) -> impl IntoView {
	let sequence = Rc::new(Cell::new(UploadSequence::default()));
	let on_change = move |ev: leptos::ev::Event| {
		let input: HtmlInputElement = event_target(&ev);
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};
		info!("reading {} ({} bytes)", file.name(), file.size());
		let mut issued = sequence.get();
		let ticket = issued.issue();
		sequence.set(issued);
		let sequence = sequence.clone();
		spawn_local(async move {
			let result = load_file(file).await;
			if !sequence.get().is_latest(ticket) {
				debug!("discarding upload #{ticket}, a newer file was chosen");
				return;
			}
			if let Err(err) = &result {
				warn!("upload rejected: {err}");
			}
			on_load.run(result);
		});
	};

	view! {
		<label class="upload">
			<span>"Spreadsheet (.xlsx or .csv)"</span>
			<input type="file" accept=".xlsx,.xlsm,.csv" on:change=on_change />
		</label>
	}
}
