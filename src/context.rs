//! Reference data shared by every conversion of a run: templates, GM programs and the factory
//! PCG. Built once up front and only ever borrowed afterwards.

use std::path::{Path, PathBuf};

use crate::bank::{KorgModel, KorgPCG};
use crate::banks::PatchMode;
use crate::dtype::PCGError;
use crate::gm::GmTable;
use crate::params::Template;
use crate::tables;

/// Where the optional reference files live.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub program_template: PathBuf,
    pub combi_template: PathBuf,
    pub gm_programs: PathBuf,
    pub gm_index: PathBuf,
    pub factory_triton: PathBuf,
    pub factory_triton_extreme: PathBuf,
}
impl DataPaths {
    pub fn in_folder<P: AsRef<Path>>(folder: P) -> DataPaths {
        let folder = folder.as_ref();
        DataPaths {
            program_template: folder.join("PatchTemplate_Program.patch"),
            combi_template: folder.join("PatchTemplate_Combi.patch"),
            gm_programs: folder.join("Factory_GM_Programs.bin"),
            gm_index: folder.join("Factory_GM_Index.json"),
            factory_triton: folder.join("Factory_Triton.PCG"),
            factory_triton_extreme: folder.join("Factory_TritonExtreme.PCG"),
        }
    }

    pub fn factory_for(&self, model: KorgModel) -> &Path {
        if model == KorgModel::TritonExtreme {
            &self.factory_triton_extreme
        } else {
            &self.factory_triton
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConversionContext {
    pub model: KorgModel,
    pub program_template: Template,
    pub combi_template: Template,
    pub gm: Option<GmTable>,
    pub factory: Option<KorgPCG>,
}

impl ConversionContext {
    /// Context with templates built from the field tables and no fallback data.
    pub fn new(model: KorgModel) -> ConversionContext {
        ConversionContext {
            model,
            program_template: Template::synthesize(PatchMode::Program),
            combi_template: Template::synthesize(PatchMode::Combi),
            gm: None,
            factory: None,
        }
    }

    /// Loads whatever reference data is present. Missing templates are synthesized, missing GM
    /// or factory data disables that fallback.
    pub fn load(model: KorgModel, paths: &DataPaths) -> Result<ConversionContext, PCGError> {
        tables::validate_all()?;
        let mut ctx = ConversionContext::new(model);
        if paths.program_template.is_file() {
            ctx.program_template = Template::load(PatchMode::Program, &paths.program_template)?;
        } else {
            tracing::info!("No program template at {}, using the built-in parameter list", paths.program_template.display());
        }
        if paths.combi_template.is_file() {
            ctx.combi_template = Template::load(PatchMode::Combi, &paths.combi_template)?;
        } else {
            tracing::info!("No combi template at {}, using the built-in parameter list", paths.combi_template.display());
        }

        if paths.gm_programs.is_file() {
            let gm = if paths.gm_index.is_file() {
                GmTable::load_factory(&paths.gm_programs, &paths.gm_index)?
            } else {
                GmTable::from_packed(&std::fs::read(&paths.gm_programs)?)?
            };
            tracing::debug!("Loaded {} GM programs", gm.len());
            ctx = ctx.with_gm(gm);
        } else {
            tracing::info!("No GM program data found, timbres using GM banks will stay unresolved");
        }

        let factory_path = paths.factory_for(model);
        if factory_path.is_file() {
            ctx = ctx.with_factory(KorgPCG::load(factory_path)?)?;
        } else {
            tracing::info!("No factory PCG at {}, missing dependencies will stay unresolved", factory_path.display());
        }
        Ok(ctx)
    }

    pub fn with_gm(mut self, gm: GmTable) -> ConversionContext {
        self.gm = Some(gm);
        self
    }

    pub fn with_factory(mut self, factory: KorgPCG) -> Result<ConversionContext, PCGError> {
        if factory.model != self.model {
            return Err(PCGError::FactoryModelMismatch { expected: self.model, found: factory.model });
        }
        self.factory = Some(factory);
        Ok(self)
    }

    pub fn template(&self, mode: PatchMode) -> &Template {
        match mode {
            PatchMode::Program => &self.program_template,
            PatchMode::Combi => &self.combi_template,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::KorgBlock;
    use crate::dtype::Tag;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_context_is_shareable() {
        assert_send_sync::<ConversionContext>();
    }

    #[test]
    fn test_factory_model_must_match() {
        let ctx = ConversionContext::new(KorgModel::TritonExtreme);
        let err = ctx.with_factory(KorgPCG::new(KorgModel::Triton)).unwrap_err();
        assert!(matches!(err, PCGError::FactoryModelMismatch { expected: KorgModel::TritonExtreme, found: KorgModel::Triton }));
    }

    #[test]
    fn test_load_from_empty_folder() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ConversionContext::load(KorgModel::Triton, &DataPaths::in_folder(dir.path())).unwrap();
        assert!(ctx.gm.is_none() && ctx.factory.is_none());
        assert!(ctx.template(PatchMode::Program).params.contains("prog_common_category"));
    }

    #[test]
    fn test_load_reads_factory() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::in_folder(dir.path());
        let mut factory = KorgPCG::new(KorgModel::TritonExtreme);
        factory.global = Some(KorgBlock { tag: Tag::GLB1, data: vec![1, 2, 3] });
        std::fs::write(&paths.factory_triton_extreme, factory.to_bytes().unwrap()).unwrap();
        let ctx = ConversionContext::load(KorgModel::TritonExtreme, &paths).unwrap();
        assert_eq!(ctx.factory.map(|f| f.model), Some(KorgModel::TritonExtreme));
    }
}
