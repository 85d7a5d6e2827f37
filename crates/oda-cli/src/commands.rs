use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use oda_cli::retry::{Backoff, retry_with_backoff};
use oda_cli::tabular::{read_csv, write_csv};
use oda_model::TranslationOptions;
use oda_schemas::{
    AREA_CODE_CORRECTIONS, DAC1, DAC2, FileSchemaSource, FsMappingStore, HttpSchemaSource,
    MappingCatalog, MappingFamily, MappingStore, SchemaSource, bundled_schemas_dir, schemas_root,
    spec_by_name,
};
use oda_transform::{
    ColumnTranslator, ConversionRequest, convert_dac1_codes_with_report,
    convert_to_target_codes_with_report, validate_request,
};

use crate::cli::{DatasetFamilyArg, ShowArgs, TranslateArgs, UpdateArgs, UpdateFamilyArg};
use crate::summary::{FamilyUpdate, print_mapping, print_translation_summary, print_update_summary};

/// Stores shared by every command.
pub struct Stores {
    pub schemas_dir: PathBuf,
    pub store: FsMappingStore,
    pub corrections: FsMappingStore,
}

impl Stores {
    /// Open the schemas directory.
    ///
    /// Corrections come from the schemas directory when it has its own copy
    /// and from the bundled directory otherwise.
    pub fn open(schemas_dir: Option<PathBuf>) -> Self {
        let schemas_dir = schemas_dir.unwrap_or_else(schemas_root);
        let store = FsMappingStore::new(&schemas_dir);
        let corrections = if store.exists(AREA_CODE_CORRECTIONS.location) {
            store.clone()
        } else {
            FsMappingStore::new(bundled_schemas_dir())
        };
        Self {
            schemas_dir,
            store,
            corrections,
        }
    }

    fn catalog<'a>(&'a self, source: &'a dyn SchemaSource) -> MappingCatalog<'a> {
        MappingCatalog::new(&self.store, source).with_corrections(&self.corrections)
    }
}

pub fn run_update(stores: &Stores, args: &UpdateArgs) -> Result<()> {
    let families: &[MappingFamily] = match args.family {
        UpdateFamilyArg::Dac1 => &[DAC1],
        UpdateFamilyArg::Dac2 => &[DAC2],
        UpdateFamilyArg::All => &[DAC1, DAC2],
    };
    let source = schema_source(args.schema_file.as_deref(), families.len())?;
    let catalog = stores.catalog(source.as_ref());
    let backoff = Backoff {
        max_retries: args.retries,
        ..Backoff::default()
    };

    let mut updates = Vec::with_capacity(families.len());
    for family in families {
        let span = info_span!("update", family = family.name);
        let _guard = span.enter();
        let written = retry_with_backoff(&backoff, || catalog.update(family))
            .with_context(|| format!("update {} mappings", family.name))?;
        updates.push(FamilyUpdate {
            family: family.name,
            mappings: family.code_lists.iter().map(|list| list.spec.name).collect(),
            written,
        });
    }
    print_update_summary(&stores.schemas_dir, &updates);

    if let Some(update) = updates
        .iter()
        .find(|update| update.written < update.mappings.len())
    {
        bail!(
            "{} structure document yielded only {} of {} mappings",
            update.family,
            update.written,
            update.mappings.len()
        );
    }
    Ok(())
}

fn schema_source(schema_file: Option<&Path>, families: usize) -> Result<Box<dyn SchemaSource>> {
    match schema_file {
        Some(path) if families == 1 => Ok(Box::new(FileSchemaSource::new(path))),
        Some(_) => bail!("--schema-file needs a single --family (dac1 or dac2)"),
        None => Ok(Box::new(
            HttpSchemaSource::new().context("create HTTP client")?,
        )),
    }
}

pub fn run_show(stores: &Stores, args: &ShowArgs) -> Result<()> {
    let spec = spec_by_name(&args.mapping)?;
    let source = HttpSchemaSource::new().context("create HTTP client")?;
    let mapping = stores
        .catalog(&source)
        .load(spec)
        .with_context(|| format!("load {}", spec.name))?;
    let mapping = if args.invert {
        mapping
            .invert()
            .with_context(|| format!("invert {}", spec.name))?
    } else {
        mapping
    };
    print_mapping(spec.name, &mapping, args.invert);
    Ok(())
}

pub fn run_translate(stores: &Stores, args: &TranslateArgs) -> Result<()> {
    validate_request(&ConversionRequest {
        pre_processed: !args.raw,
        target_codes: !args.keep_codes,
    })?;

    let span = info_span!("translate", input = %args.input.display());
    let _guard = span.enter();

    let df = read_csv(&args.input)?;
    info!(rows = df.height(), columns = df.width(), "read dataset");

    let (mut df, reports) = if args.keep_codes {
        (df, Vec::new())
    } else {
        let source = HttpSchemaSource::new().context("create HTTP client")?;
        let catalog = stores.catalog(&source);
        let translator = ColumnTranslator::new(
            TranslationOptions::new().with_unmapped(args.unmapped.into()),
        );
        let converted = match args.family {
            DatasetFamilyArg::Dac2 => {
                convert_to_target_codes_with_report(&df, &catalog, &translator)
            }
            DatasetFamilyArg::Dac1 => convert_dac1_codes_with_report(&df, &catalog, &translator),
        };
        converted.context("convert codes")?
    };

    write_csv(&mut df, &args.output)?;
    info!(path = %args.output.display(), rows = df.height(), "wrote dataset");
    print_translation_summary(&args.input, &args.output, &reports);
    Ok(())
}
