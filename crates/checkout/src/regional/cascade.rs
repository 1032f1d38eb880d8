//! Cascading regional selection state.
//!
//! Each level owns its option list and an independent loading flag. A
//! level's selector is usable only while its own data is not loading and its
//! parent level has a selection. Selecting a level clears every descendant
//! selection and option list *before* the child fetch starts, so no caller
//! ever observes a child selection that disagrees with its parent.
//!
//! Mutation requires `&mut self`, which serializes selections: a newer
//! selection cannot begin until the prior fetch future has completed or been
//! dropped, and a dropped future never applies its response. A stale child
//! list therefore cannot overwrite a newer selection.

use tracing::warn;

use super::{District, Province, Regency, RegionalDirectory, RegionalError, Village};
use crate::address::Address;

/// Option lists and loading state for the four regional levels.
#[derive(Debug)]
pub struct RegionCascade<D> {
    directory: D,
    provinces: Vec<Province>,
    regencies: Vec<Regency>,
    districts: Vec<District>,
    villages: Vec<Village>,
    loading_provinces: bool,
    loading_regencies: bool,
    loading_districts: bool,
    loading_villages: bool,
}

impl<D: RegionalDirectory> RegionCascade<D> {
    /// Create an empty cascade over a directory.
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            provinces: Vec::new(),
            regencies: Vec::new(),
            districts: Vec::new(),
            villages: Vec::new(),
            loading_provinces: false,
            loading_regencies: false,
            loading_districts: false,
            loading_villages: false,
        }
    }

    /// Load the province list.
    ///
    /// # Errors
    ///
    /// Returns [`RegionalError`] if the fetch fails; the list is left empty.
    pub async fn load_provinces(&mut self) -> Result<(), RegionalError> {
        self.loading_provinces = true;
        let result = self.directory.provinces().await;
        self.loading_provinces = false;
        match result {
            Ok(list) => {
                self.provinces = list;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load provinces");
                Err(e)
            }
        }
    }

    /// Select a province and load its regencies.
    ///
    /// Clears the regency/district/village selections and their option
    /// lists before the fetch starts. An empty `province_id` only clears.
    ///
    /// # Errors
    ///
    /// Returns [`RegionalError`] if the regency fetch fails; the province
    /// selection is kept and the regency list stays empty.
    pub async fn select_province(
        &mut self,
        address: &mut Address,
        province_id: &str,
    ) -> Result<(), RegionalError> {
        address.province_id = province_id.to_string();
        address.province = self
            .provinces
            .iter()
            .find(|p| p.id == province_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        address.regency_id.clear();
        address.city.clear();
        address.district_id.clear();
        address.district.clear();
        address.village_id.clear();
        address.village.clear();
        self.regencies.clear();
        self.districts.clear();
        self.villages.clear();

        if province_id.is_empty() {
            return Ok(());
        }

        self.loading_regencies = true;
        let result = self.directory.regencies(province_id).await;
        self.loading_regencies = false;
        match result {
            Ok(list) => {
                self.regencies = list;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, province_id, "Failed to load regencies");
                Err(e)
            }
        }
    }

    /// Select a regency and load its districts.
    ///
    /// # Errors
    ///
    /// Returns [`RegionalError`] if the district fetch fails.
    pub async fn select_regency(
        &mut self,
        address: &mut Address,
        regency_id: &str,
    ) -> Result<(), RegionalError> {
        address.regency_id = regency_id.to_string();
        address.city = self
            .regencies
            .iter()
            .find(|r| r.id == regency_id)
            .map(|r| r.name.clone())
            .unwrap_or_default();
        address.district_id.clear();
        address.district.clear();
        address.village_id.clear();
        address.village.clear();
        self.districts.clear();
        self.villages.clear();

        if regency_id.is_empty() {
            return Ok(());
        }

        self.loading_districts = true;
        let result = self.directory.districts(regency_id).await;
        self.loading_districts = false;
        match result {
            Ok(list) => {
                self.districts = list;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, regency_id, "Failed to load districts");
                Err(e)
            }
        }
    }

    /// Select a district and load its villages.
    ///
    /// # Errors
    ///
    /// Returns [`RegionalError`] if the village fetch fails.
    pub async fn select_district(
        &mut self,
        address: &mut Address,
        district_id: &str,
    ) -> Result<(), RegionalError> {
        address.district_id = district_id.to_string();
        address.district = self
            .districts
            .iter()
            .find(|d| d.id == district_id)
            .map(|d| d.name.clone())
            .unwrap_or_default();
        address.village_id.clear();
        address.village.clear();
        self.villages.clear();

        if district_id.is_empty() {
            return Ok(());
        }

        self.loading_villages = true;
        let result = self.directory.villages(district_id).await;
        self.loading_villages = false;
        match result {
            Ok(list) => {
                self.villages = list;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, district_id, "Failed to load villages");
                Err(e)
            }
        }
    }

    /// Select a village. The bottom level has no children to load.
    pub fn select_village(&mut self, address: &mut Address, village_id: &str) {
        address.village_id = village_id.to_string();
        address.village = self
            .villages
            .iter()
            .find(|v| v.id == village_id)
            .map(|v| v.name.clone())
            .unwrap_or_default();
    }

    /// Re-seed the option lists for a previously saved address.
    ///
    /// Used when checkout mounts with a restored address: each level whose
    /// ID is present gets its list fetched, best-effort and independently -
    /// one failed level does not stop the others.
    pub async fn restore(&mut self, address: &Address) {
        if let Err(e) = self.load_provinces().await {
            warn!(error = %e, "Restore: province list unavailable");
        }
        if !address.province_id.is_empty() {
            self.loading_regencies = true;
            match self.directory.regencies(&address.province_id).await {
                Ok(list) => self.regencies = list,
                Err(e) => warn!(error = %e, "Restore: regency list unavailable"),
            }
            self.loading_regencies = false;
        }
        if !address.regency_id.is_empty() {
            self.loading_districts = true;
            match self.directory.districts(&address.regency_id).await {
                Ok(list) => self.districts = list,
                Err(e) => warn!(error = %e, "Restore: district list unavailable"),
            }
            self.loading_districts = false;
        }
        if !address.district_id.is_empty() {
            self.loading_villages = true;
            match self.directory.villages(&address.district_id).await {
                Ok(list) => self.villages = list,
                Err(e) => warn!(error = %e, "Restore: village list unavailable"),
            }
            self.loading_villages = false;
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Loaded provinces.
    #[must_use]
    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    /// Regencies of the selected province.
    #[must_use]
    pub fn regencies(&self) -> &[Regency] {
        &self.regencies
    }

    /// Districts of the selected regency.
    #[must_use]
    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    /// Villages of the selected district.
    #[must_use]
    pub fn villages(&self) -> &[Village] {
        &self.villages
    }

    /// Whether the province list is loading.
    #[must_use]
    pub const fn loading_provinces(&self) -> bool {
        self.loading_provinces
    }

    /// Whether the regency list is loading.
    #[must_use]
    pub const fn loading_regencies(&self) -> bool {
        self.loading_regencies
    }

    /// Whether the district list is loading.
    #[must_use]
    pub const fn loading_districts(&self) -> bool {
        self.loading_districts
    }

    /// Whether the village list is loading.
    #[must_use]
    pub const fn loading_villages(&self) -> bool {
        self.loading_villages
    }

    /// Whether the province selector is usable.
    #[must_use]
    pub const fn province_selector_enabled(&self) -> bool {
        !self.loading_provinces
    }

    /// Whether the regency selector is usable: not loading, parent selected.
    #[must_use]
    pub fn regency_selector_enabled(&self, address: &Address) -> bool {
        !self.loading_regencies && !address.province_id.is_empty()
    }

    /// Whether the district selector is usable.
    #[must_use]
    pub fn district_selector_enabled(&self, address: &Address) -> bool {
        !self.loading_districts && !address.regency_id.is_empty()
    }

    /// Whether the village selector is usable.
    #[must_use]
    pub fn village_selector_enabled(&self, address: &Address) -> bool {
        !self.loading_villages && !address.district_id.is_empty()
    }
}
