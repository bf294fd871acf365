//! The data element records of the standard dictionary.
//!
//! This is a selection of the attributes of DICOM PS3.6,
//! covering the file meta group, the common patient, study, series
//! and image modules, and the repeating overlay and curve groups.

use dcmtree_core::dictionary::{DataDictionaryEntryRef, TagRange::*};
use dcmtree_core::{Tag, VR};

type E = DataDictionaryEntryRef<'static>;

#[rustfmt::skip]
pub(crate) const ENTRIES: &[E] = &[
    E { tag: Single(Tag(0x0000, 0x0000)), alias: "CommandGroupLength", vr: VR::UL, vm: "1", retired: false },
    E { tag: Single(Tag(0x0000, 0x0002)), alias: "AffectedSOPClassUID", vr: VR::UI, vm: "1", retired: false },
    E { tag: Single(Tag(0x0000, 0x0100)), alias: "CommandField", vr: VR::US, vm: "1", retired: false },
    E { tag: Single(Tag(0x0000, 0x0110)), alias: "MessageID", vr: VR::US, vm: "1", retired: false },
    E { tag: Single(Tag(0x0000, 0x0800)), alias: "CommandDataSetType", vr: VR::US, vm: "1", retired: false },
    E { tag: Single(Tag(0x0000, 0x0900)), alias: "Status", vr: VR::US, vm: "1", retired: false },
    E { tag: Single(Tag(0x0002, 0x0000)), alias: "FileMetaInformationGroupLength", vr: VR::UL, vm: "1", retired: false },
    E { tag: Single(Tag(0x0002, 0x0001)), alias: "FileMetaInformationVersion", vr: VR::OB, vm: "1", retired: false },
    E { tag: Single(Tag(0x0002, 0x0002)), alias: "MediaStorageSOPClassUID", vr: VR::UI, vm: "1", retired: false },
    E { tag: Single(Tag(0x0002, 0x0003)), alias: "MediaStorageSOPInstanceUID", vr: VR::UI, vm: "1", retired: false },
    E { tag: Single(Tag(0x0002, 0x0010)), alias: "TransferSyntaxUID", vr: VR::UI, vm: "1", retired: false },
    E { tag: Single(Tag(0x0002, 0x0012)), alias: "ImplementationClassUID", vr: VR::UI, vm: "1", retired: false },
    E { tag: Single(Tag(0x0002, 0x0013)), alias: "ImplementationVersionName", vr: VR::SH, vm: "1", retired: false },
    E { tag: Single(Tag(0x0002, 0x0016)), alias: "SourceApplicationEntityTitle", vr: VR::AE, vm: "1", retired: false },
    E { tag: Single(Tag(0x0002, 0x0017)), alias: "SendingApplicationEntityTitle", vr: VR::AE, vm: "1", retired: false },
    E { tag: Single(Tag(0x0002, 0x0018)), alias: "ReceivingApplicationEntityTitle", vr: VR::AE, vm: "1", retired: false },
    E { tag: Single(Tag(0x0002, 0x0100)), alias: "PrivateInformationCreatorUID", vr: VR::UI, vm: "1", retired: false },
    E { tag: Single(Tag(0x0002, 0x0102)), alias: "PrivateInformation", vr: VR::OB, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0005)), alias: "SpecificCharacterSet", vr: VR::CS, vm: "1-n", retired: false },
    E { tag: Single(Tag(0x0008, 0x0008)), alias: "ImageType", vr: VR::CS, vm: "2-n", retired: false },
    E { tag: Single(Tag(0x0008, 0x0010)), alias: "RecognitionCode", vr: VR::SH, vm: "1", retired: true },
    E { tag: Single(Tag(0x0008, 0x0012)), alias: "InstanceCreationDate", vr: VR::DA, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0013)), alias: "InstanceCreationTime", vr: VR::TM, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0014)), alias: "InstanceCreatorUID", vr: VR::UI, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0016)), alias: "SOPClassUID", vr: VR::UI, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0018)), alias: "SOPInstanceUID", vr: VR::UI, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0020)), alias: "StudyDate", vr: VR::DA, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0021)), alias: "SeriesDate", vr: VR::DA, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0022)), alias: "AcquisitionDate", vr: VR::DA, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0023)), alias: "ContentDate", vr: VR::DA, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x002A)), alias: "AcquisitionDateTime", vr: VR::DT, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0030)), alias: "StudyTime", vr: VR::TM, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0031)), alias: "SeriesTime", vr: VR::TM, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0032)), alias: "AcquisitionTime", vr: VR::TM, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0033)), alias: "ContentTime", vr: VR::TM, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0040)), alias: "DataSetType", vr: VR::US, vm: "1", retired: true },
    E { tag: Single(Tag(0x0008, 0x0050)), alias: "AccessionNumber", vr: VR::SH, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0060)), alias: "Modality", vr: VR::CS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0064)), alias: "ConversionType", vr: VR::CS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0070)), alias: "Manufacturer", vr: VR::LO, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0080)), alias: "InstitutionName", vr: VR::LO, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0081)), alias: "InstitutionAddress", vr: VR::ST, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0090)), alias: "ReferringPhysicianName", vr: VR::PN, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0100)), alias: "CodeValue", vr: VR::SH, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0102)), alias: "CodingSchemeDesignator", vr: VR::SH, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x0104)), alias: "CodeMeaning", vr: VR::LO, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x1000)), alias: "NetworkID", vr: VR::AE, vm: "1", retired: true },
    E { tag: Single(Tag(0x0008, 0x1010)), alias: "StationName", vr: VR::SH, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x1030)), alias: "StudyDescription", vr: VR::LO, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x103E)), alias: "SeriesDescription", vr: VR::LO, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x1040)), alias: "InstitutionalDepartmentName", vr: VR::LO, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x1050)), alias: "PerformingPhysicianName", vr: VR::PN, vm: "1-n", retired: false },
    E { tag: Single(Tag(0x0008, 0x1090)), alias: "ManufacturerModelName", vr: VR::LO, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x1110)), alias: "ReferencedStudySequence", vr: VR::SQ, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x1111)), alias: "ReferencedPerformedProcedureStepSequence", vr: VR::SQ, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x1115)), alias: "ReferencedSeriesSequence", vr: VR::SQ, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x1140)), alias: "ReferencedImageSequence", vr: VR::SQ, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x1150)), alias: "ReferencedSOPClassUID", vr: VR::UI, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x1155)), alias: "ReferencedSOPInstanceUID", vr: VR::UI, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x2111)), alias: "DerivationDescription", vr: VR::ST, vm: "1", retired: false },
    E { tag: Single(Tag(0x0008, 0x9215)), alias: "DerivationCodeSequence", vr: VR::SQ, vm: "1", retired: false },
    E { tag: Single(Tag(0x0010, 0x0010)), alias: "PatientName", vr: VR::PN, vm: "1", retired: false },
    E { tag: Single(Tag(0x0010, 0x0020)), alias: "PatientID", vr: VR::LO, vm: "1", retired: false },
    E { tag: Single(Tag(0x0010, 0x0030)), alias: "PatientBirthDate", vr: VR::DA, vm: "1", retired: false },
    E { tag: Single(Tag(0x0010, 0x0040)), alias: "PatientSex", vr: VR::CS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0010, 0x1000)), alias: "OtherPatientIDs", vr: VR::LO, vm: "1-n", retired: true },
    E { tag: Single(Tag(0x0010, 0x1010)), alias: "PatientAge", vr: VR::AS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0010, 0x1020)), alias: "PatientSize", vr: VR::DS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0010, 0x1030)), alias: "PatientWeight", vr: VR::DS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0010, 0x2160)), alias: "EthnicGroup", vr: VR::SH, vm: "1", retired: false },
    E { tag: Single(Tag(0x0010, 0x21B0)), alias: "AdditionalPatientHistory", vr: VR::LT, vm: "1", retired: false },
    E { tag: Single(Tag(0x0010, 0x4000)), alias: "PatientComments", vr: VR::LT, vm: "1", retired: false },
    E { tag: Single(Tag(0x0018, 0x0010)), alias: "ContrastBolusAgent", vr: VR::LO, vm: "1", retired: false },
    E { tag: Single(Tag(0x0018, 0x0015)), alias: "BodyPartExamined", vr: VR::CS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0018, 0x0020)), alias: "ScanningSequence", vr: VR::CS, vm: "1-n", retired: false },
    E { tag: Single(Tag(0x0018, 0x0050)), alias: "SliceThickness", vr: VR::DS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0018, 0x0060)), alias: "KVP", vr: VR::DS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0018, 0x0080)), alias: "RepetitionTime", vr: VR::DS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0018, 0x0081)), alias: "EchoTime", vr: VR::DS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0018, 0x0087)), alias: "MagneticFieldStrength", vr: VR::DS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0018, 0x0088)), alias: "SpacingBetweenSlices", vr: VR::DS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0018, 0x1020)), alias: "SoftwareVersions", vr: VR::LO, vm: "1-n", retired: false },
    E { tag: Single(Tag(0x0018, 0x1030)), alias: "ProtocolName", vr: VR::LO, vm: "1", retired: false },
    E { tag: Single(Tag(0x0018, 0x1151)), alias: "XRayTubeCurrent", vr: VR::IS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0018, 0x1152)), alias: "Exposure", vr: VR::IS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0018, 0x5100)), alias: "PatientPosition", vr: VR::CS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0020, 0x000D)), alias: "StudyInstanceUID", vr: VR::UI, vm: "1", retired: false },
    E { tag: Single(Tag(0x0020, 0x000E)), alias: "SeriesInstanceUID", vr: VR::UI, vm: "1", retired: false },
    E { tag: Single(Tag(0x0020, 0x0010)), alias: "StudyID", vr: VR::SH, vm: "1", retired: false },
    E { tag: Single(Tag(0x0020, 0x0011)), alias: "SeriesNumber", vr: VR::IS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0020, 0x0012)), alias: "AcquisitionNumber", vr: VR::IS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0020, 0x0013)), alias: "InstanceNumber", vr: VR::IS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0020, 0x0020)), alias: "PatientOrientation", vr: VR::CS, vm: "2", retired: false },
    E { tag: Single(Tag(0x0020, 0x0030)), alias: "ImagePosition", vr: VR::DS, vm: "3", retired: true },
    E { tag: Single(Tag(0x0020, 0x0032)), alias: "ImagePositionPatient", vr: VR::DS, vm: "3", retired: false },
    E { tag: Single(Tag(0x0020, 0x0035)), alias: "ImageOrientation", vr: VR::DS, vm: "6", retired: true },
    E { tag: Single(Tag(0x0020, 0x0037)), alias: "ImageOrientationPatient", vr: VR::DS, vm: "6", retired: false },
    E { tag: Single(Tag(0x0020, 0x0052)), alias: "FrameOfReferenceUID", vr: VR::UI, vm: "1", retired: false },
    E { tag: Single(Tag(0x0020, 0x1040)), alias: "PositionReferenceIndicator", vr: VR::LO, vm: "1", retired: false },
    E { tag: Single(Tag(0x0020, 0x1041)), alias: "SliceLocation", vr: VR::DS, vm: "1", retired: false },
    E { tag: Element100(Tag(0x0020, 0x3100)), alias: "SourceImageIDs", vr: VR::CS, vm: "1-n", retired: true },
    E { tag: Single(Tag(0x0020, 0x4000)), alias: "ImageComments", vr: VR::LT, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x0002)), alias: "SamplesPerPixel", vr: VR::US, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x0004)), alias: "PhotometricInterpretation", vr: VR::CS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x0006)), alias: "PlanarConfiguration", vr: VR::US, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x0008)), alias: "NumberOfFrames", vr: VR::IS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x0009)), alias: "FrameIncrementPointer", vr: VR::AT, vm: "1-n", retired: false },
    E { tag: Single(Tag(0x0028, 0x0010)), alias: "Rows", vr: VR::US, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x0011)), alias: "Columns", vr: VR::US, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x0030)), alias: "PixelSpacing", vr: VR::DS, vm: "2", retired: false },
    E { tag: Single(Tag(0x0028, 0x0034)), alias: "PixelAspectRatio", vr: VR::IS, vm: "2", retired: false },
    E { tag: Single(Tag(0x0028, 0x0040)), alias: "ImageFormat", vr: VR::CS, vm: "1", retired: true },
    E { tag: Single(Tag(0x0028, 0x0100)), alias: "BitsAllocated", vr: VR::US, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x0101)), alias: "BitsStored", vr: VR::US, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x0102)), alias: "HighBit", vr: VR::US, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x0103)), alias: "PixelRepresentation", vr: VR::US, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x0106)), alias: "SmallestImagePixelValue", vr: VR::US, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x0107)), alias: "LargestImagePixelValue", vr: VR::US, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x1050)), alias: "WindowCenter", vr: VR::DS, vm: "1-n", retired: false },
    E { tag: Single(Tag(0x0028, 0x1051)), alias: "WindowWidth", vr: VR::DS, vm: "1-n", retired: false },
    E { tag: Single(Tag(0x0028, 0x1052)), alias: "RescaleIntercept", vr: VR::DS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x1053)), alias: "RescaleSlope", vr: VR::DS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x1054)), alias: "RescaleType", vr: VR::LO, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x1101)), alias: "RedPaletteColorLookupTableDescriptor", vr: VR::US, vm: "3", retired: false },
    E { tag: Single(Tag(0x0028, 0x1201)), alias: "RedPaletteColorLookupTableData", vr: VR::OW, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x2110)), alias: "LossyImageCompression", vr: VR::CS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0028, 0x3002)), alias: "LUTDescriptor", vr: VR::US, vm: "3", retired: false },
    E { tag: Single(Tag(0x0028, 0x3006)), alias: "LUTData", vr: VR::US, vm: "1-n", retired: false },
    E { tag: Single(Tag(0x0028, 0x3010)), alias: "VOILUTSequence", vr: VR::SQ, vm: "1", retired: false },
    E { tag: Single(Tag(0x0032, 0x000A)), alias: "StudyStatusID", vr: VR::CS, vm: "1", retired: true },
    E { tag: Single(Tag(0x0032, 0x1060)), alias: "RequestedProcedureDescription", vr: VR::LO, vm: "1", retired: false },
    E { tag: Single(Tag(0x0040, 0x0009)), alias: "ScheduledProcedureStepID", vr: VR::SH, vm: "1", retired: false },
    E { tag: Single(Tag(0x0040, 0x0100)), alias: "ScheduledProcedureStepSequence", vr: VR::SQ, vm: "1", retired: false },
    E { tag: Single(Tag(0x0040, 0x0244)), alias: "PerformedProcedureStepStartDate", vr: VR::DA, vm: "1", retired: false },
    E { tag: Single(Tag(0x0040, 0x0245)), alias: "PerformedProcedureStepStartTime", vr: VR::TM, vm: "1", retired: false },
    E { tag: Single(Tag(0x0040, 0x0253)), alias: "PerformedProcedureStepID", vr: VR::SH, vm: "1", retired: false },
    E { tag: Single(Tag(0x0040, 0x0254)), alias: "PerformedProcedureStepDescription", vr: VR::LO, vm: "1", retired: false },
    E { tag: Single(Tag(0x0040, 0x0260)), alias: "PerformedProtocolCodeSequence", vr: VR::SQ, vm: "1", retired: false },
    E { tag: Single(Tag(0x0040, 0x0275)), alias: "RequestAttributesSequence", vr: VR::SQ, vm: "1", retired: false },
    E { tag: Single(Tag(0x0040, 0x1001)), alias: "RequestedProcedureID", vr: VR::SH, vm: "1", retired: false },
    E { tag: Single(Tag(0x0040, 0xA010)), alias: "RelationshipType", vr: VR::CS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0040, 0xA040)), alias: "ValueType", vr: VR::CS, vm: "1", retired: false },
    E { tag: Single(Tag(0x0040, 0xA043)), alias: "ConceptNameCodeSequence", vr: VR::SQ, vm: "1", retired: false },
    E { tag: Single(Tag(0x0040, 0xA160)), alias: "TextValue", vr: VR::UT, vm: "1", retired: false },
    E { tag: Single(Tag(0x0040, 0xA730)), alias: "ContentSequence", vr: VR::SQ, vm: "1", retired: false },
    E { tag: Single(Tag(0x0054, 0x0016)), alias: "RadiopharmaceuticalInformationSequence", vr: VR::SQ, vm: "1", retired: false },
    E { tag: Single(Tag(0x0054, 0x0220)), alias: "ViewCodeSequence", vr: VR::SQ, vm: "1", retired: false },
    E { tag: Single(Tag(0x0088, 0x0140)), alias: "StorageMediaFileSetUID", vr: VR::UI, vm: "1", retired: false },
    E { tag: Group100(Tag(0x5000, 0x0005)), alias: "CurveDimensions", vr: VR::US, vm: "1", retired: true },
    E { tag: Group100(Tag(0x5000, 0x0010)), alias: "NumberOfPoints", vr: VR::US, vm: "1", retired: true },
    E { tag: Group100(Tag(0x5000, 0x0020)), alias: "TypeOfData", vr: VR::CS, vm: "1", retired: true },
    E { tag: Group100(Tag(0x5000, 0x3000)), alias: "CurveData", vr: VR::OW, vm: "1", retired: true },
    E { tag: Group100(Tag(0x6000, 0x0010)), alias: "OverlayRows", vr: VR::US, vm: "1", retired: false },
    E { tag: Group100(Tag(0x6000, 0x0011)), alias: "OverlayColumns", vr: VR::US, vm: "1", retired: false },
    E { tag: Group100(Tag(0x6000, 0x0022)), alias: "OverlayDescription", vr: VR::LO, vm: "1", retired: false },
    E { tag: Group100(Tag(0x6000, 0x0040)), alias: "OverlayType", vr: VR::CS, vm: "1", retired: false },
    E { tag: Group100(Tag(0x6000, 0x0050)), alias: "OverlayOrigin", vr: VR::SS, vm: "2", retired: false },
    E { tag: Group100(Tag(0x6000, 0x0100)), alias: "OverlayBitsAllocated", vr: VR::US, vm: "1", retired: false },
    E { tag: Group100(Tag(0x6000, 0x0102)), alias: "OverlayBitPosition", vr: VR::US, vm: "1", retired: false },
    E { tag: Group100(Tag(0x6000, 0x1500)), alias: "OverlayLabel", vr: VR::LO, vm: "1", retired: false },
    E { tag: Group100(Tag(0x6000, 0x3000)), alias: "OverlayData", vr: VR::OW, vm: "1", retired: false },
    E { tag: Group100(Tag(0x7F00, 0x0010)), alias: "VariablePixelData", vr: VR::OW, vm: "1", retired: true },
    E { tag: Single(Tag(0x7FE0, 0x0008)), alias: "FloatPixelData", vr: VR::OF, vm: "1", retired: false },
    E { tag: Single(Tag(0x7FE0, 0x0009)), alias: "DoubleFloatPixelData", vr: VR::OD, vm: "1", retired: false },
    E { tag: Single(Tag(0x7FE0, 0x0010)), alias: "PixelData", vr: VR::OW, vm: "1", retired: false },
    E { tag: Single(Tag(0x7FE0, 0x0020)), alias: "CoefficientsSDVN", vr: VR::OW, vm: "1", retired: true },
    E { tag: Single(Tag(0xFFFA, 0xFFFA)), alias: "DigitalSignaturesSequence", vr: VR::SQ, vm: "1", retired: false },
    E { tag: Single(Tag(0xFFFC, 0xFFFC)), alias: "DataSetTrailingPadding", vr: VR::OB, vm: "1", retired: false },
    E { tag: Single(Tag(0xFFFE, 0xE000)), alias: "Item", vr: VR::UN, vm: "1", retired: false },
    E { tag: Single(Tag(0xFFFE, 0xE00D)), alias: "ItemDelimitationItem", vr: VR::UN, vm: "1", retired: false },
    E { tag: Single(Tag(0xFFFE, 0xE0DD)), alias: "SequenceDelimitationItem", vr: VR::UN, vm: "1", retired: false },
];
