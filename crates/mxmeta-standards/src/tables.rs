//! Process-wide vocabulary tables.

use std::sync::LazyLock;

use crate::vocabulary::Vocabulary;

/// Catch-all term for values outside a table.
pub const OTHER: &str = "Other";

/// Data reduction, scaling, phasing and refinement programs.
pub static SOFTWARE: LazyLock<Vocabulary> = LazyLock::new(|| {
    Vocabulary::new(
        "software",
        &[
            ("AUTOPROC", "Autoproc"),
            ("AUTOPROCESS", "Autoproc"),
            ("XDS", "XDS"),
            ("XSCALE", "XSCALE"),
            ("XDSAPP", "XDSAPP"),
            ("AIMLESS", "Aimless"),
            ("SCALA", "SCALA"),
            ("POINTLESS", "Pointless"),
            ("TRUNCATE", "TRUNCATE"),
            ("CTRUNCATE", "TRUNCATE"),
            ("MOSFLM", "MOSFLM"),
            ("IMOSFLM", "MOSFLM"),
            ("DIALS", "DIALS"),
            ("XIA2", "xia2"),
            ("HKL-2000", "HKL-2000"),
            ("HKL2000", "HKL-2000"),
            ("HKL-3000", "HKL-2000"),
            ("DENZO", "HKL-2000"),
            ("SCALEPACK", "HKL-2000"),
            ("STARANISO", "STARANISO"),
            ("PHENIX", "PHENIX"),
            ("PHENIX.REFINE", "PHENIX"),
            ("REFMAC", "REFMAC"),
            ("REFMAC5", "REFMAC"),
            ("BUSTER", "BUSTER"),
            ("BUSTER-TNT", "BUSTER"),
            ("COOT", "Coot"),
            ("PHASER", "Phaser"),
            ("MOLREP", "MOLREP"),
            ("SHELX", "SHELX"),
            ("SHELXC", "SHELX"),
            ("SHELXD", "SHELX"),
            ("SHELXE", "SHELX"),
            ("SHELXL", "SHELX"),
            ("PDB_EXTRACT", "PDB_EXTRACT"),
        ],
    )
    .with_fallback(OTHER)
});

/// Radiation source types (`diffrn_source.source`).
pub static SOURCE_TYPE: LazyLock<Vocabulary> = LazyLock::new(|| {
    Vocabulary::new(
        "source",
        &[
            ("SYNCHROTRON", "Synchrotron"),
            ("ROTATING ANODE", "Rotating anode"),
            ("SEALED TUBE", "Sealed tube"),
            ("LIQUID ANODE", "Liquid anode"),
            ("METAL JET", "Liquid anode"),
            ("FREE ELECTRON LASER", "Free electron laser"),
            ("XFEL", "Free electron laser"),
            ("FEL", "Free electron laser"),
        ],
    )
    .with_fallback(OTHER)
});

/// Detector technologies; model names resolve through keywords.
pub static DETECTOR_TYPE: LazyLock<Vocabulary> = LazyLock::new(|| {
    Vocabulary::new(
        "detector",
        &[
            ("PIXEL", "Pixel"),
            ("HYBRID PIXEL", "Pixel"),
            ("CCD", "CCD"),
            ("IMAGE PLATE", "Image plate"),
            ("AREA DETECTOR", "Image plate"),
            ("CMOS", "CMOS"),
        ],
    )
    .with_keywords(&[
        ("PILATUS", "Pixel"),
        ("EIGER", "Pixel"),
        ("JUNGFRAU", "Pixel"),
        ("PIXEL", "Pixel"),
        ("ADSC", "CCD"),
        ("RAYONIX", "CCD"),
        ("MARMOSAIC", "CCD"),
        ("SATURN", "CCD"),
        ("CCD", "CCD"),
        ("MAR345", "Image plate"),
        ("RAXIS", "Image plate"),
        ("IMAGEPLATE", "Image plate"),
        ("PHOTONII", "CMOS"),
        ("PHOTON", "CMOS"),
        ("CMOS", "CMOS"),
    ])
    .with_fallback(OTHER)
});
